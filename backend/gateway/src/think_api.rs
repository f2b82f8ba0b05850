//! `/think/*` routes.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

use paddock_agent::ContextPatch;

use crate::envelope::{ApiResult, body, ok};
use crate::server::GatewayState;
use crate::session::SessionKey;

#[derive(Debug, Deserialize)]
pub struct ResetBody {
    #[serde(default = "keep_driver_default")]
    pub keep_driver: bool,
}

fn keep_driver_default() -> bool {
    true
}

impl Default for ResetBody {
    fn default() -> Self {
        Self { keep_driver: true }
    }
}

pub async fn context(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
) -> ApiResult<Value> {
    let shared = state.store.get_or_create(&session_id).await;
    let session = shared.lock().await;
    let snapshot = state.dispatcher.think_get_context(&session);
    Ok(ok(json!({ "context": snapshot })))
}

pub async fn update(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<ContextPatch>, JsonRejection>,
) -> ApiResult<Value> {
    let patch = body(payload)?;
    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    let updates = state.dispatcher.think_update_context(&mut session, &patch)?;
    Ok(ok(json!({ "updates": updates })))
}

pub async fn analysis(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
) -> ApiResult<Value> {
    let shared = state.store.get_or_create(&session_id).await;
    let session = shared.lock().await;
    let analysis = state.dispatcher.think_analyze_performance(&session);
    Ok(ok(json!({ "analysis": analysis })))
}

/// `POST /think/reset`. An empty body keeps the driver.
pub async fn reset(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Option<Json<ResetBody>>,
) -> ApiResult<Value> {
    let request = payload.map(|Json(b)| b).unwrap_or_default();
    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    state
        .dispatcher
        .think_reset(&mut session, request.keep_driver, state.store.defaults());
    let snapshot = state.dispatcher.think_get_context(&session);
    Ok(ok(json!({ "context": snapshot })))
}
