//! `POST /speak`

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;

use paddock_agent::Spoken;
use paddock_core::MessageType;

use crate::envelope::{ApiResult, body, ok};
use crate::server::GatewayState;
use crate::session::SessionKey;

#[derive(Debug, Default, Deserialize)]
pub struct SpeakBody {
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub custom_context: Option<String>,
}

pub async fn speak(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<SpeakBody>, JsonRejection>,
) -> ApiResult<Spoken> {
    let request = body(payload)?;
    let message_type = match request.message_type.as_deref() {
        None => MessageType::Post,
        Some(raw) => raw.parse::<MessageType>()?,
    };

    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    let spoken = state
        .dispatcher
        .speak(&mut session, message_type, request.custom_context.as_deref())
        .await?;
    Ok(ok(spoken))
}
