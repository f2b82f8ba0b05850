//! Static reference data. These routes return raw JSON, not envelopes;
//! only failures use the error envelope.

use std::collections::BTreeMap;

use axum::{Json, extract::Path};

use paddock_core::PaddockError;
use paddock_racing::{Circuit, Team, circuit, circuits, teams};

use crate::envelope::ApiError;

/// `GET /api/data/circuits`
pub async fn list_circuits() -> Json<BTreeMap<&'static str, &'static Circuit>> {
    Json(circuits().iter().map(|c| (c.key, c)).collect())
}

/// `GET /api/data/circuits/:key`
pub async fn get_circuit(Path(key): Path<String>) -> Result<Json<&'static Circuit>, ApiError> {
    circuit(&key)
        .map(Json)
        .ok_or_else(|| ApiError(PaddockError::not_found(format!("circuit {key}"))))
}

/// `GET /api/data/teams`
pub async fn list_teams() -> Json<BTreeMap<&'static str, &'static Team>> {
    Json(teams().iter().map(|t| (t.key.as_str(), t)).collect())
}
