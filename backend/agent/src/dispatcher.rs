//! Capability Dispatcher.
//!
//! Speak, Act, and Think operate on one locked [`AgentSession`] at a time.
//! Collaborators (text generation, sentiment, engagement, results) are
//! injected so the same dispatcher runs against a live model or offline.

use std::sync::Arc;
use std::time::Duration;

use paddock_core::{MessageType, Result, SentimentClassifier};
use paddock_logging::{AgentEvent, EventLogger};
use paddock_providers::LexiconClassifier;
use paddock_racing::{RandomResultPolicy, ResultPolicy};

use crate::engagement::{EngagementPolicy, MoodWeightedEngagement};
use crate::session::AgentSession;
use crate::speak::{Speaker, Spoken};

pub const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Dispatcher {
    pub(crate) speaker: Speaker,
    pub(crate) classifier: Arc<dyn SentimentClassifier>,
    pub(crate) engagement: Arc<dyn EngagementPolicy>,
    pub(crate) results: Arc<dyn ResultPolicy>,
    pub(crate) classifier_timeout: Duration,
}

impl Dispatcher {
    pub fn new(speaker: Speaker) -> Self {
        Self {
            speaker,
            classifier: Arc::new(LexiconClassifier::new()),
            engagement: Arc::new(MoodWeightedEngagement::new()),
            results: Arc::new(RandomResultPolicy::new()),
            classifier_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn SentimentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_engagement(mut self, engagement: Arc<dyn EngagementPolicy>) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn with_results(mut self, results: Arc<dyn ResultPolicy>) -> Self {
        self.results = results;
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    /// Generate a message in the driver's voice. Context is left untouched.
    pub async fn speak(
        &self,
        session: &mut AgentSession,
        message_type: MessageType,
        custom_context: Option<&str>,
    ) -> Result<Spoken> {
        let spoken = self
            .speaker
            .speak(session, message_type, custom_context, None)
            .await?;
        EventLogger::log_event(
            &session.id,
            AgentEvent::Speak {
                message_type: message_type.to_string(),
                message: spoken.message.clone(),
            },
        );
        Ok(spoken)
    }
}
