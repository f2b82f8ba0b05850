//! Paddock Gateway HTTP API Server
//!
//! JSON endpoints for the persona's capabilities, wrapped in a
//! `{success, error?, ...}` envelope, plus raw reference-data routes.

pub mod act_api;
pub mod data_api;
pub mod envelope;
pub mod health_api;
pub mod server;
pub mod session;
pub mod session_api;
pub mod simulation_api;
pub mod speak_api;
pub mod think_api;

pub use envelope::{ApiError, ApiResult, Envelope};
pub use server::{GatewayState, build_router, start_server};
pub use session::{DEFAULT_COOKIE_NAME, SESSION_HEADER, SessionKey};
