//! Telemetry and structured logging for Paddock.
//!
//! Subscriber setup with optional NDJSON file rotation, log redaction, and
//! the structured agent event log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AgentEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
