//! Act: simulated social actions. Every action lands in the session's
//! bounded history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use paddock_core::{MessageType, PaddockError, Result, Sentiment};
use paddock_logging::{AgentEvent, EventLogger};

use crate::dispatcher::Dispatcher;
use crate::history::{ActionKind, ActionRecord};
use crate::prompt::PromptBuilder;
use crate::session::AgentSession;
use crate::speak::{MAX_MESSAGE_CHARS, truncate_chars};

pub const LIKE_PREVIEW_CHARS: usize = 100;
pub const DEFAULT_MENTION_CONTEXT: &str = "general";

#[derive(Debug, Clone, Serialize)]
pub struct PostOutcome {
    pub content: String,
    pub engagement: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyOutcome {
    pub original_comment: String,
    pub reply: String,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LikeOutcome {
    pub liked_post: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentionOutcome {
    pub content: String,
    pub mentioned_person: String,
    pub context: String,
    pub timestamp: DateTime<Utc>,
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PaddockError::validation(format!("{field} is required")));
    }
    Ok(value)
}

fn record(session: &mut AgentSession, action: ActionRecord) {
    debug!(session_id = %session.id, kind = ?action.kind, "Recording action");
    EventLogger::log_event(
        &session.id,
        AgentEvent::Action {
            kind: format!("{:?}", action.kind).to_lowercase(),
            content: action.content.clone(),
        },
    );
    session.history.push(action);
}

impl Dispatcher {
    /// Publish `content` as a post and report its simulated engagement.
    pub async fn act_post(&self, session: &mut AgentSession, content: &str) -> Result<PostOutcome> {
        let content = required(content, "content")?.to_string();
        let engagement = self.engagement.engagement(session.context.mood);
        let timestamp = Utc::now();

        let mut action = ActionRecord::new(ActionKind::Post, content.clone(), timestamp);
        action.engagement = Some(engagement);
        record(session, action);

        Ok(PostOutcome {
            content,
            engagement,
            timestamp,
        })
    }

    /// Classify a fan comment and answer it in the persona's voice.
    pub async fn act_reply(
        &self,
        session: &mut AgentSession,
        fan_comment: &str,
    ) -> Result<ReplyOutcome> {
        let comment = required(fan_comment, "fan_comment")?.to_string();
        let sentiment = match self.classify(&comment).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                EventLogger::log_event(
                    &session.id,
                    AgentEvent::Error {
                        error_msg: e.to_string(),
                    },
                );
                return Err(e);
            }
        };

        let prompt = PromptBuilder::reply_context(&comment, sentiment);
        let spoken = self
            .speaker
            .speak(session, MessageType::Reply, Some(&prompt), Some(sentiment))
            .await?;

        let mut action =
            ActionRecord::new(ActionKind::Reply, spoken.message.clone(), spoken.timestamp)
                .with_target(comment.clone());
        action.sentiment = Some(sentiment);
        record(session, action);

        Ok(ReplyOutcome {
            original_comment: comment,
            reply: spoken.message,
            sentiment,
            timestamp: spoken.timestamp,
        })
    }

    /// Like a post. Only the first hundred characters are echoed back.
    pub async fn act_like(&self, session: &mut AgentSession, post_content: &str) -> Result<LikeOutcome> {
        let post = required(post_content, "post_content")?;
        let liked_post = if post.chars().count() > LIKE_PREVIEW_CHARS {
            let preview: String = post.chars().take(LIKE_PREVIEW_CHARS).collect();
            format!("{preview}...")
        } else {
            post.to_string()
        };
        let timestamp = Utc::now();

        let action = ActionRecord::new(ActionKind::Like, format!("Liked post: {liked_post}"), timestamp)
            .with_target(post);
        record(session, action);

        Ok(LikeOutcome {
            liked_post,
            timestamp,
        })
    }

    /// Write a post that mentions `person_name`, tagging them if the
    /// generated text forgot to.
    pub async fn act_mention(
        &self,
        session: &mut AgentSession,
        person_name: &str,
        context_tag: &str,
    ) -> Result<MentionOutcome> {
        let person = required(person_name, "person_name")?.to_string();
        let tag = match context_tag.trim() {
            "" => DEFAULT_MENTION_CONTEXT.to_string(),
            t => t.to_string(),
        };

        let prompt = PromptBuilder::mention_context(&person, &tag);
        let spoken = self
            .speaker
            .speak(session, MessageType::Mention, Some(&prompt), None)
            .await?;
        let content = if spoken.message.contains(&person) {
            spoken.message
        } else {
            truncate_chars(&format!("@{person} {}", spoken.message), MAX_MESSAGE_CHARS)
        };

        let mut action = ActionRecord::new(ActionKind::Mention, content.clone(), spoken.timestamp)
            .with_target(person.clone());
        action.mention_context = Some(tag.clone());
        record(session, action);

        Ok(MentionOutcome {
            content,
            mentioned_person: person,
            context: tag,
            timestamp: spoken.timestamp,
        })
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        match tokio::time::timeout(self.classifier_timeout, self.classifier.classify(text)).await {
            Ok(Ok(sentiment)) => Ok(sentiment),
            Ok(Err(e)) => Err(PaddockError::Sentiment(format!(
                "{} failed: {e}",
                self.classifier.name()
            ))),
            Err(_) => Err(PaddockError::Sentiment(format!(
                "{} timed out after {}ms",
                self.classifier.name(),
                self.classifier_timeout.as_millis()
            ))),
        }
    }
}
