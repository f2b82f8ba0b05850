//! `POST /simulation`

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::envelope::{ApiResult, body, ok};
use crate::server::GatewayState;
use crate::session::SessionKey;

#[derive(Debug, Default, Deserialize)]
pub struct SimulationBody {
    #[serde(default)]
    pub circuit_key: String,
    #[serde(default)]
    pub weekend_type: String,
}

pub async fn run(
    State(state): State<GatewayState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<SimulationBody>, JsonRejection>,
) -> ApiResult<Value> {
    let request = body(payload)?;
    let shared = state.store.get_or_create(&session_id).await;
    let mut session = shared.lock().await;
    let report = state
        .dispatcher
        .simulate_weekend(&mut session, &request.circuit_key, &request.weekend_type)
        .await?;
    Ok(ok(json!({ "results": report })))
}
