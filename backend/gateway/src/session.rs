//! Session resolution.
//!
//! The `x-session-id` header wins, then the session cookie. Requests with
//! neither get a fresh UUID, handed back in `Set-Cookie`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::server::GatewayState;

pub const SESSION_HEADER: &str = "x-session-id";
pub const DEFAULT_COOKIE_NAME: &str = "paddock_session";

/// Resolved session id for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey(pub String);

fn from_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn from_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Middleware attaching a [`SessionKey`] to every request.
pub async fn resolve_session(
    State(state): State<GatewayState>,
    mut req: Request,
    next: Next,
) -> Response {
    let known = from_header(req.headers()).or_else(|| from_cookie(req.headers(), &state.cookie_name));
    let (id, fresh) = match known {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };
    if fresh {
        debug!(session_id = %id, "Issuing new session id");
    }

    req.extensions_mut().insert(SessionKey(id.clone()));
    let mut response = next.run(req).await;

    if fresh {
        let cookie = format!("{}={id}; Path=/; HttpOnly; SameSite=Lax", state.cookie_name);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Could not encode session cookie"),
        }
    }
    response
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionKey>()
            .cloned()
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "Session not resolved"))
    }
}
