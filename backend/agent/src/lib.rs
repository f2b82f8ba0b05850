//! Paddock Agent
//!
//! The per-session persona: the context store, the Speak / Act / Think
//! capability dispatcher, and the race weekend simulation runner.

pub mod act;
pub mod configure;
pub mod dispatcher;
pub mod engagement;
pub mod history;
pub mod prompt;
pub mod session;
pub mod simulation;
pub mod speak;
pub mod store;
pub mod think;

pub use act::{LikeOutcome, MentionOutcome, PostOutcome, ReplyOutcome};
pub use configure::{ConfigureRequest, Configured};
pub use dispatcher::{DEFAULT_COLLABORATOR_TIMEOUT, Dispatcher};
pub use engagement::{EngagementPolicy, FixedEngagement, MoodWeightedEngagement};
pub use history::{ActionKind, ActionRecord, DEFAULT_HISTORY_LIMIT, MemoryEntry};
pub use prompt::PromptBuilder;
pub use session::{AgentSession, SessionId};
pub use simulation::{SessionReport, WeekendReport};
pub use speak::{MAX_MESSAGE_CHARS, Speaker, Spoken};
pub use store::{AgentProfile, ContextStore, SharedSession};
pub use think::{ContextPatch, ContextSnapshot, PerformanceAnalysis, SessionExport};
