//! Everything the agent remembers about one client session.

use paddock_core::AgentContext;

use crate::history::{ActionHistory, ConversationMemory};

pub type SessionId = String;

/// Context plus the bounded action and speech logs for one session.
#[derive(Debug, Clone)]
pub struct AgentSession {
    pub id: SessionId,
    pub context: AgentContext,
    pub history: ActionHistory,
    pub memory: ConversationMemory,
    /// Total messages spoken, including ones the memory has since forgotten.
    pub messages_spoken: usize,
}

impl AgentSession {
    pub fn new(id: impl Into<SessionId>, context: AgentContext, history_limit: usize) -> Self {
        Self {
            id: id.into(),
            context,
            history: ActionHistory::new(history_limit),
            memory: ConversationMemory::new(history_limit),
            messages_spoken: 0,
        }
    }
}
