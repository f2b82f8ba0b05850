//! Bounded per-session logs: the actions the persona performed and the
//! messages it spoke.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paddock_core::{MessageType, Sentiment, SessionType};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Post,
    Reply,
    Like,
    Mention,
}

/// One simulated social action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_context: Option<String>,
}

impl ActionRecord {
    pub fn new(kind: ActionKind, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            content: content.into(),
            target: None,
            timestamp,
            engagement: None,
            sentiment: None,
            mention_context: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// A message the persona spoke, with the situation it was spoken in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub message: String,
    pub message_type: MessageType,
    pub circuit: String,
    pub session: Option<SessionType>,
    pub timestamp: DateTime<Utc>,
}

/// FIFO log that forgets its oldest entries past `limit`.
#[derive(Debug, Clone)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    limit: usize,
}

impl<T: Clone> BoundedLog<T> {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The newest `limit` entries, oldest first. `None` returns everything.
    pub fn recent(&self, limit: Option<usize>) -> Vec<T> {
        let take = limit.unwrap_or(self.entries.len()).min(self.entries.len());
        self.entries
            .iter()
            .skip(self.entries.len() - take)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub type ActionHistory = BoundedLog<ActionRecord>;
pub type ConversationMemory = BoundedLog<MemoryEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_limit() {
        let mut log = BoundedLog::new(3);
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.recent(None), vec![2, 3, 4]);
    }

    #[test]
    fn recent_returns_newest_in_order() {
        let mut log = BoundedLog::new(10);
        for i in 0..6 {
            log.push(i);
        }
        assert_eq!(log.recent(Some(2)), vec![4, 5]);
        assert_eq!(log.recent(Some(100)).len(), 6);
        assert_eq!(log.last(), Some(&5));
    }

    #[test]
    fn action_record_skips_empty_metadata() {
        let record = ActionRecord::new(ActionKind::Like, "Liked post: hi", Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "like");
        assert!(json.get("engagement").is_none());
        assert!(json.get("target").is_none());
    }
}
