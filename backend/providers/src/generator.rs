//! LLM-backed text generation.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use paddock_core::{GenerationRequest, LlmProvider, LlmRequest, PaddockError, TextGenerator};

/// Sampling settings passed through to the provider.
#[derive(Debug, Clone)]
pub struct SamplingConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            model: crate::mistral::DEFAULT_MODEL.to_string(),
            max_tokens: 100,
            temperature: 0.7,
            top_p: Some(0.8),
        }
    }
}

const SYSTEM_PROMPT: &str = "You write social media posts in the voice of a Formula 1 driver. \
Reply with the post text only.";

/// Asks an [`LlmProvider`] for the message and strips the commentary
/// models like to wrap around it.
pub struct LlmTextGenerator {
    provider: Arc<dyn LlmProvider>,
    sampling: SamplingConfig,
}

impl LlmTextGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, sampling: SamplingConfig) -> Self {
        Self { provider, sampling }
    }
}

#[async_trait]
impl TextGenerator for LlmTextGenerator {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let llm_request = LlmRequest {
            model: self.sampling.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: request.prompt.clone(),
            max_tokens: self.sampling.max_tokens,
            temperature: self.sampling.temperature,
            top_p: self.sampling.top_p,
        };

        let response = self
            .provider
            .complete(&llm_request)
            .await
            .map_err(|e| PaddockError::LlmError {
                provider: self.provider.name().to_string(),
                message: format!("{e:#}"),
            })?;
        info!(
            provider = %response.provider,
            tokens = response.tokens_used,
            latency_ms = response.latency_ms,
            "Provider responded"
        );

        let cleaned = clean_llm_response(&response.content);
        if cleaned.is_empty() {
            bail!("{} returned no usable message", response.provider);
        }
        debug!(chars = cleaned.chars().count(), "Cleaned LLM message");
        Ok(cleaned)
    }
}

fn is_meta_line(line: &str) -> bool {
    (line.starts_with('*') && line.contains("chars"))
        || line.starts_with("- ")
        || line.starts_with("**")
        || line.starts_with('#')
        || line.starts_with("Note:")
        || line.contains("F1 terminology")
        || line.contains("Emotion:")
        || line.contains("Relevant details:")
}

/// Keep the first paragraph of actual message text, dropping headings,
/// bullet-point rationale, and "Note:" lines.
pub fn clean_llm_response(raw: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            if !kept.is_empty() {
                break;
            }
            continue;
        }
        if is_meta_line(line) {
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
        .trim_matches(|c: char| c == '"' || c == '“' || c == '”')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use paddock_core::{MessageType, Mood};

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "prompt".into(),
            message_type: MessageType::Post,
            mood: Mood::Neutral,
            session: None,
            last_position: None,
            sentiment: None,
            circuit_name: "Silverstone Circuit".into(),
            teammate: "Lando Norris".into(),
            variant: 0,
        }
    }

    #[test]
    fn strips_rationale_and_keeps_first_paragraph() {
        let raw = "\"Pole at Silverstone! Mega lap from the team. #P1\"\n\n\
                   **Why this works:**\n- Uses F1 terminology\n*(212 chars)*";
        assert_eq!(
            clean_llm_response(raw),
            "Pole at Silverstone! Mega lap from the team. #P1"
        );
    }

    #[test]
    fn all_meta_yields_empty() {
        assert_eq!(clean_llm_response("# Heading\nNote: nothing here"), "");
    }

    #[tokio::test]
    async fn returns_cleaned_provider_text() {
        let provider = Arc::new(MockProvider::new("mock").with_response("  Flat out in FP2!  "));
        let generator = LlmTextGenerator::new(provider, SamplingConfig::default());
        assert_eq!(generator.generate(&request()).await.unwrap(), "Flat out in FP2!");
        assert_eq!(generator.name(), "mock");
    }

    #[tokio::test]
    async fn provider_failure_is_an_llm_error() {
        let provider = Arc::new(MockProvider::new("flaky").failing());
        let generator = LlmTextGenerator::new(provider, SamplingConfig::default());
        let err = generator.generate(&request()).await.unwrap_err();
        match err.downcast_ref::<PaddockError>() {
            Some(PaddockError::LlmError { provider, message }) => {
                assert_eq!(provider, "flaky");
                assert!(message.contains("configured to fail"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_provider_text_is_an_error() {
        let provider = Arc::new(MockProvider::new("mock").with_response("## only a heading"));
        let generator = LlmTextGenerator::new(provider, SamplingConfig::default());
        assert!(generator.generate(&request()).await.is_err());
    }
}
