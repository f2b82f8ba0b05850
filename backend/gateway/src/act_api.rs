//! `/act/*` routes.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

use paddock_agent::{LikeOutcome, MentionOutcome, PostOutcome, ReplyOutcome};

use crate::envelope::{ApiResult, body, ok};
use crate::server::GatewayState;
use crate::session::SessionKey;

const DEFAULT_HISTORY_PAGE: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct PostBody {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplyBody {
    #[serde(default)]
    pub fan_comment: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LikeBody {
    #[serde(default)]
    pub post_content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MentionBody {
    #[serde(default)]
    pub person_name: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub async fn post(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<PostBody>, JsonRejection>,
) -> ApiResult<PostOutcome> {
    let request = body(payload)?;
    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    let outcome = state.dispatcher.act_post(&mut session, &request.content).await?;
    Ok(ok(outcome))
}

pub async fn reply(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<ReplyBody>, JsonRejection>,
) -> ApiResult<ReplyOutcome> {
    let request = body(payload)?;
    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    let outcome = state
        .dispatcher
        .act_reply(&mut session, &request.fan_comment)
        .await?;
    Ok(ok(outcome))
}

pub async fn like(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<LikeBody>, JsonRejection>,
) -> ApiResult<LikeOutcome> {
    let request = body(payload)?;
    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    let outcome = state
        .dispatcher
        .act_like(&mut session, &request.post_content)
        .await?;
    Ok(ok(outcome))
}

pub async fn mention(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<MentionBody>, JsonRejection>,
) -> ApiResult<MentionOutcome> {
    let request = body(payload)?;
    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    let outcome = state
        .dispatcher
        .act_mention(&mut session, &request.person_name, &request.context)
        .await?;
    Ok(ok(outcome))
}

/// `GET /act/history?limit=`
pub async fn history(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Value> {
    let shared = state.store.get_or_create(&session_id).await;
    let session = shared.lock().await;
    let actions = state
        .dispatcher
        .history(&session, Some(query.limit.unwrap_or(DEFAULT_HISTORY_PAGE)));
    Ok(ok(json!({ "actions": actions })))
}
