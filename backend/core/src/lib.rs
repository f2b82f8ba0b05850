//! Core types, error taxonomy, and collaborator traits shared by every
//! Paddock crate.

pub mod context;
pub mod error;
pub mod traits;
pub mod types;

pub use context::{AgentContext, SessionResult, MAX_RECENT_INCIDENTS};
pub use error::{PaddockError, Result};
pub use traits::{
    GenerationRequest, LlmProvider, LlmRequest, LlmResponse, SentimentClassifier, TextGenerator,
};
pub use types::{
    FinishTier, MessageType, Mood, Sentiment, SessionType, TeamKey, WeekendPhase, WeekendType,
};
