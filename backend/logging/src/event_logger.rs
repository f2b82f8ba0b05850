//! Agent Event Logger
//!
//! Structured persona events (speak, action, context update, simulation,
//! error) emitted under the `agent_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    Speak {
        message_type: String,
        message: String,
    },
    Action {
        kind: String,
        content: String,
    },
    ContextUpdate {
        fields: Vec<String>,
    },
    Simulation {
        circuit: String,
        weekend_type: String,
        final_status: String,
    },
    Error {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AgentEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact free text in `event` and emit it through tracing.
    pub fn log_event(session_id: &str, mut event: AgentEvent) {
        match &mut event {
            AgentEvent::Speak { message, .. } => {
                *message = redact_sensitive_data(message);
            }
            AgentEvent::Action { content, .. } => {
                *content = redact_sensitive_data(content);
            }
            AgentEvent::Error { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            AgentEvent::ContextUpdate { .. } | AgentEvent::Simulation { .. } => {}
        }

        let entry = EventLogEntry {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        };

        info!(target: "agent_events", event = ?entry, "Agent event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_carry_event_details() {
        let entry = EventLogEntry {
            session_id: "s1".into(),
            timestamp: Utc::now(),
            event: AgentEvent::ContextUpdate {
                fields: vec!["mood".into()],
            },
        };
        let debug = format!("{entry:?}");
        assert!(debug.contains("ContextUpdate"));
        assert!(debug.contains("mood"));
    }

    #[test]
    fn logging_without_a_subscriber_is_harmless() {
        EventLogger::log_event(
            "s1",
            AgentEvent::Error {
                error_msg: "apiKey: hunter2 rejected".into(),
            },
        );
    }
}
