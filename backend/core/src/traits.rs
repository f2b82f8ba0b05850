use anyhow::Result;
use async_trait::async_trait;

use crate::types::{MessageType, Mood, Sentiment, SessionType};

/// Trait for chat-completion LLM providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "mistral", "mock").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}

/// Everything a text generator may draw on to write one message.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Fully rendered prompt for model-backed generators.
    pub prompt: String,
    pub message_type: MessageType,
    pub mood: Mood,
    pub session: Option<SessionType>,
    pub last_position: Option<u8>,
    /// Set for replies to a fan comment.
    pub sentiment: Option<Sentiment>,
    pub circuit_name: String,
    pub teammate: String,
    /// Stable selector so template picks are deterministic per call site.
    pub variant: usize,
}

/// Produces persona text. Model-backed and template-backed generators are
/// interchangeable behind this trait.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Classifies the polarity of a piece of text.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<Sentiment>;
}
