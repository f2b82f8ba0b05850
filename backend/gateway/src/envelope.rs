//! Response envelope and error mapping.
//!
//! Every capability response is `{success, error?, ...payload}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use paddock_core::PaddockError;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

/// Wrap a payload in a successful envelope. `payload` must serialize to a map.
pub fn ok<T: Serialize>(payload: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        payload,
    })
}

pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// A [`PaddockError`] on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PaddockError);

impl From<PaddockError> for ApiError {
    fn from(err: PaddockError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PaddockError::validation(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

pub fn status_for(err: &PaddockError) -> StatusCode {
    match err {
        PaddockError::Validation(_) => StatusCode::BAD_REQUEST,
        PaddockError::NotFound(_) => StatusCode::NOT_FOUND,
        PaddockError::Generation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PaddockError::LlmError { .. } | PaddockError::Sentiment(_) => StatusCode::BAD_GATEWAY,
        PaddockError::ConfigError(_) | PaddockError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, kind = self.0.kind(), "Request failed");
        } else {
            warn!(error = %self.0, kind = self.0.kind(), "Request rejected");
        }
        let body = json!({
            "success": false,
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        });
        (status, Json(body)).into_response()
    }
}

/// Unwrap an optional JSON body, turning malformed input into a
/// validation error inside the envelope.
pub fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(b)| b).map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_error_kind() {
        assert_eq!(status_for(&PaddockError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&PaddockError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&PaddockError::Generation("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&PaddockError::Sentiment("x".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&PaddockError::Other(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn envelope_flattens_payload() {
        let Json(envelope) = ok(json!({"message": "hi"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": true, "message": "hi"}));
    }
}
