//! Speak: persona text generation with template fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use paddock_core::{
    AgentContext, GenerationRequest, MessageType, PaddockError, Result, Sentiment, TextGenerator,
};
use paddock_providers::TemplateGenerator;
use paddock_racing::circuit;

use crate::history::MemoryEntry;
use crate::prompt::PromptBuilder;
use crate::session::AgentSession;

pub const MAX_MESSAGE_CHARS: usize = 280;
/// Hashtags are only appended to messages shorter than this.
pub const HASHTAG_THRESHOLD_CHARS: usize = 250;

#[derive(Debug, Clone, Serialize)]
pub struct Spoken {
    pub message: String,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
}

/// Asks the primary generator (if any) under a timeout, falling back to
/// templates on error, timeout, or empty output.
pub struct Speaker {
    primary: Option<Arc<dyn TextGenerator>>,
    fallback: TemplateGenerator,
    timeout: Duration,
}

impl Speaker {
    pub fn new(primary: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            primary: Some(primary),
            fallback: TemplateGenerator::new(),
            timeout,
        }
    }

    pub fn templates_only() -> Self {
        Self {
            primary: None,
            fallback: TemplateGenerator::new(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Name of the generator tried first.
    pub fn primary_name(&self) -> &str {
        self.primary
            .as_ref()
            .map(|g| g.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    async fn generate(&self, request: &GenerationRequest) -> String {
        if let Some(primary) = &self.primary {
            match tokio::time::timeout(self.timeout, primary.generate(request)).await {
                Ok(Ok(text)) if !text.trim().is_empty() => return text,
                Ok(Ok(_)) => warn!(generator = primary.name(), "Empty generation, using templates"),
                Ok(Err(e)) => {
                    warn!(generator = primary.name(), error = %e, "Generation failed, using templates")
                }
                Err(_) => warn!(
                    generator = primary.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Generation timed out, using templates"
                ),
            }
        }
        self.fallback.render(request)
    }

    /// Compose one message for `context`. Does not touch the context.
    pub async fn compose(
        &self,
        context: &AgentContext,
        message_type: MessageType,
        custom_context: Option<&str>,
        sentiment: Option<Sentiment>,
        variant: usize,
    ) -> Result<String> {
        let circuit_name = circuit(&context.current_circuit)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|| context.current_circuit.clone());
        let request = GenerationRequest {
            prompt: PromptBuilder::build(context, message_type, custom_context),
            message_type,
            mood: context.mood,
            session: context.current_session,
            last_position: context.last_result.as_ref().map(|r| r.position),
            sentiment,
            circuit_name,
            teammate: context.teammate.clone(),
            variant,
        };

        let text = self.generate(&request).await;
        let text = text.trim();
        if text.is_empty() {
            return Err(PaddockError::Generation("no text could be produced".into()));
        }
        let message = enhance(text, context);
        debug!(%message_type, chars = message.chars().count(), "Composed message");
        Ok(message)
    }

    /// Speak for a session: compose, then remember what was said.
    pub async fn speak(
        &self,
        session: &mut AgentSession,
        message_type: MessageType,
        custom_context: Option<&str>,
        sentiment: Option<Sentiment>,
    ) -> Result<Spoken> {
        let message = self
            .compose(
                &session.context,
                message_type,
                custom_context,
                sentiment,
                session.messages_spoken,
            )
            .await?;
        let timestamp = Utc::now();
        session.messages_spoken += 1;
        session.memory.push(MemoryEntry {
            message: message.clone(),
            message_type,
            circuit: session.context.current_circuit.clone(),
            session: session.context.current_session,
            timestamp,
        });
        Ok(Spoken {
            message,
            message_type,
            timestamp,
        })
    }
}

/// Append circuit and session hashtags to short messages, then cap length.
pub fn enhance(message: &str, context: &AgentContext) -> String {
    let mut message = message.to_string();
    if let Some(c) = circuit(&context.current_circuit) {
        let tag = c.hashtag();
        if !message.contains(&tag) && message.chars().count() < HASHTAG_THRESHOLD_CHARS {
            message.push(' ');
            message.push_str(&tag);
        }
    }
    if let Some(session) = context.current_session {
        let tag = session.hashtag();
        if !message.contains(&tag) && message.chars().count() < HASHTAG_THRESHOLD_CHARS {
            message.push(' ');
            message.push_str(&tag);
        }
    }
    truncate_chars(&message, MAX_MESSAGE_CHARS)
}

/// Cut to at most `max` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use paddock_core::{SessionType, TeamKey};
    use paddock_providers::{LlmTextGenerator, MockProvider, SamplingConfig};

    use crate::store::AgentProfile;

    fn context() -> AgentContext {
        AgentContext::new("Alex Driver", TeamKey::Mclaren, "Lando Norris", "silverstone", 5)
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        async fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
            bail!("upstream unavailable")
        }
    }

    #[tokio::test]
    async fn every_message_type_fits() {
        let speaker = Speaker::templates_only();
        let mut ctx = context();
        ctx.enter_session(SessionType::SprintShootout);
        for (i, mt) in [
            MessageType::Post,
            MessageType::Reply,
            MessageType::StatusUpdate,
            MessageType::Mention,
        ]
        .into_iter()
        .enumerate()
        {
            let text = speaker.compose(&ctx, mt, None, None, i).await.unwrap();
            assert!(!text.is_empty());
            assert!(text.chars().count() <= MAX_MESSAGE_CHARS);
        }
    }

    #[tokio::test]
    async fn adds_circuit_and_session_tags() {
        let mut ctx = context();
        ctx.enter_session(SessionType::Fp2);
        let text = Speaker::templates_only()
            .compose(&ctx, MessageType::StatusUpdate, None, None, 0)
            .await
            .unwrap();
        assert!(text.contains("#SilverstoneCircuit"));
        assert!(text.ends_with("#FP2"));
    }

    #[tokio::test]
    async fn failing_generator_falls_back() {
        let speaker = Speaker::new(Arc::new(Failing), Duration::from_secs(1));
        let text = speaker
            .compose(&context(), MessageType::Post, None, None, 0)
            .await
            .unwrap();
        assert!(text.starts_with("Focus and determination."));
    }

    #[tokio::test]
    async fn stalled_provider_falls_back() {
        let provider = MockProvider::new("slow")
            .with_response("too late")
            .with_delay(Duration::from_secs(5));
        let generator = LlmTextGenerator::new(Arc::new(provider), SamplingConfig::default());
        let speaker = Speaker::new(Arc::new(generator), Duration::from_millis(20));
        let text = speaker
            .compose(&context(), MessageType::Post, None, None, 1)
            .await
            .unwrap();
        assert!(!text.contains("too late"));
        assert!(text.starts_with("Another day"));
    }

    #[tokio::test]
    async fn provider_text_is_used_and_enhanced() {
        let provider = MockProvider::new("mock").with_response("Box box, great stint!");
        let generator = LlmTextGenerator::new(Arc::new(provider), SamplingConfig::default());
        let speaker = Speaker::new(Arc::new(generator), Duration::from_secs(1));
        assert_eq!(speaker.primary_name(), "mock");
        let text = speaker
            .compose(&context(), MessageType::Post, None, None, 0)
            .await
            .unwrap();
        assert_eq!(text, "Box box, great stint! #SilverstoneCircuit");
    }

    #[tokio::test]
    async fn long_text_is_capped_without_tags() {
        let long = "flat out ".repeat(60);
        let provider = MockProvider::new("mock").with_response(long);
        let generator = LlmTextGenerator::new(Arc::new(provider), SamplingConfig::default());
        let speaker = Speaker::new(Arc::new(generator), Duration::from_secs(1));
        let text = speaker
            .compose(&context(), MessageType::Post, None, None, 0)
            .await
            .unwrap();
        assert!(text.chars().count() <= MAX_MESSAGE_CHARS);
        assert!(text.ends_with("..."));
        assert!(!text.contains('#'));
    }

    #[tokio::test]
    async fn speak_records_memory_without_touching_context() {
        let profile = AgentProfile {
            championship_position: Some(5),
            ..AgentProfile::default()
        };
        let mut session = profile.new_session("s1");
        let before = session.context.clone();
        let spoken = Speaker::templates_only()
            .speak(&mut session, MessageType::Post, Some("home race"), None)
            .await
            .unwrap();
        assert_eq!(session.context, before);
        assert_eq!(session.memory.len(), 1);
        assert_eq!(session.messages_spoken, 1);
        assert_eq!(session.memory.last().unwrap().message, spoken.message);
    }

    #[test]
    fn truncation_counts_characters() {
        let text = "🏁".repeat(300);
        let cut = truncate_chars(&text, 280);
        assert_eq!(cut.chars().count(), 280);
        assert_eq!(truncate_chars("short", 280), "short");
    }
}
