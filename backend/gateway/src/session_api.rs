//! Session lifecycle routes: configure, status, export, end.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};

use paddock_agent::{ConfigureRequest, Configured};

use crate::envelope::{ApiResult, body, ok};
use crate::server::GatewayState;
use crate::session::SessionKey;

/// `POST /configure`
pub async fn configure(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<ConfigureRequest>, JsonRejection>,
) -> ApiResult<Configured> {
    let request = body(payload)?;
    let configured = state.store.apply_configuration(&session_id, &request).await?;
    Ok(ok(configured))
}

/// `GET /api/agent/status`. Raw JSON, and never creates a session.
pub async fn status(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
) -> Json<Value> {
    let Some(shared) = state.store.get(&session_id).await else {
        return Json(json!({ "configured": false }));
    };
    let session = shared.lock().await;
    let ctx = &session.context;
    Json(json!({
        "configured": true,
        "driver_name": ctx.driver_name,
        "team": ctx.team,
        "current_circuit": ctx.current_circuit,
        "current_session": ctx.current_session,
        "mood": ctx.mood,
        "actions_performed": session.history.len(),
    }))
}

/// `GET /session/export`
pub async fn export(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
) -> ApiResult<Value> {
    let shared = state.store.get_or_create(&session_id).await;
    let session = shared.lock().await;
    Ok(ok(json!({ "export": state.dispatcher.export(&session) })))
}

/// `DELETE /session`
pub async fn end(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
) -> ApiResult<Value> {
    let ended = state.store.end(&session_id).await;
    Ok(ok(json!({ "ended": ended })))
}
