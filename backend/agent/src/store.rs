//! Agent Context Store.
//!
//! One [`AgentSession`] per session id, each behind its own mutex so a
//! request holds exactly one record for its whole duration. Requests on
//! the same session are applied one after the other.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use paddock_core::{AgentContext, TeamKey};
use paddock_racing::{DEFAULT_CIRCUIT, teammate_for};

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::session::{AgentSession, SessionId};

pub type SharedSession = Arc<Mutex<AgentSession>>;

pub const DEFAULT_DRIVER_NAME: &str = "Alex Driver";

/// Who the persona is when a session starts.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub driver_name: String,
    pub team: TeamKey,
    pub circuit: String,
    pub history_limit: usize,
    /// Fixed championship position; drawn from 1..=20 when unset.
    pub championship_position: Option<u8>,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            driver_name: DEFAULT_DRIVER_NAME.to_string(),
            team: TeamKey::default(),
            circuit: DEFAULT_CIRCUIT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            championship_position: None,
        }
    }
}

impl AgentProfile {
    pub fn build_context(&self) -> AgentContext {
        let position = self
            .championship_position
            .unwrap_or_else(|| rand::thread_rng().gen_range(1..=20));
        AgentContext::new(
            self.driver_name.clone(),
            self.team,
            teammate_for(&self.driver_name, self.team),
            self.circuit.clone(),
            position,
        )
    }

    pub fn new_session(&self, id: impl Into<SessionId>) -> AgentSession {
        AgentSession::new(id, self.build_context(), self.history_limit)
    }
}

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Session id to session record map, shared across handlers.
#[derive(Clone)]
pub struct ContextStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    defaults: Arc<AgentProfile>,
}

impl ContextStore {
    pub fn new(defaults: AgentProfile) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            defaults: Arc::new(defaults),
        }
    }

    pub fn defaults(&self) -> &AgentProfile {
        &self.defaults
    }

    /// Fetch the session, creating it from the default profile on first contact.
    pub async fn get_or_create(&self, id: &str) -> SharedSession {
        let mut w = self.sessions.write().await;
        let entry = w.entry(id.to_string()).or_insert_with(|| {
            debug!(session_id = %id, "Creating agent session");
            Entry {
                session: Arc::new(Mutex::new(self.defaults.new_session(id))),
                last_seen: Instant::now(),
            }
        });
        entry.last_seen = Instant::now();
        entry.session.clone()
    }

    pub async fn get(&self, id: &str) -> Option<SharedSession> {
        let mut w = self.sessions.write().await;
        w.get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            entry.session.clone()
        })
    }

    /// Replace whatever the session held with a fresh record for `profile`.
    pub async fn configure(&self, id: &str, profile: &AgentProfile) -> SharedSession {
        let session = Arc::new(Mutex::new(profile.new_session(id)));
        let mut w = self.sessions.write().await;
        w.insert(
            id.to_string(),
            Entry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        info!(session_id = %id, driver = %profile.driver_name, team = %profile.team, "Agent configured");
        session
    }

    /// Drop a session. Returns whether it existed.
    pub async fn end(&self, id: &str) -> bool {
        let mut w = self.sessions.write().await;
        w.remove(id).is_some()
    }

    /// Evict sessions untouched for longer than `max_idle`.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut w = self.sessions.write().await;
        let before = w.len();
        w.retain(|_, entry| entry.last_seen.elapsed() <= max_idle);
        let evicted = before - w.len();
        if evicted > 0 {
            info!(evicted, remaining = w.len(), "Evicted idle sessions");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Background task running [`ContextStore::evict_idle`] every `every`.
    pub fn spawn_sweeper(&self, every: Duration, max_idle: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                store.evict_idle(max_idle).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AgentProfile {
        AgentProfile {
            championship_position: Some(7),
            ..AgentProfile::default()
        }
    }

    #[tokio::test]
    async fn first_contact_creates_defaults() {
        let store = ContextStore::new(profile());
        let session = store.get_or_create("abc").await;
        let session = session.lock().await;
        assert_eq!(session.context.driver_name, DEFAULT_DRIVER_NAME);
        assert_eq!(session.context.current_circuit, "silverstone");
        assert_eq!(session.context.championship_position, 7);
        assert_eq!(session.context.teammate, "Lando Norris");
    }

    #[tokio::test]
    async fn same_id_same_record() {
        let store = ContextStore::new(profile());
        let a = store.get_or_create("abc").await;
        let b = store.get_or_create("abc").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = ContextStore::new(profile());
        store.get_or_create("a").await.lock().await.context.current_circuit = "monaco".into();
        let other = store.get_or_create("b").await;
        assert_eq!(other.lock().await.context.current_circuit, "silverstone");
    }

    #[tokio::test]
    async fn configure_replaces_record() {
        let store = ContextStore::new(profile());
        store.get_or_create("abc").await;
        let custom = AgentProfile {
            driver_name: "Max Verstappen".into(),
            team: TeamKey::RedBull,
            ..profile()
        };
        let session = store.configure("abc", &custom).await;
        let session = session.lock().await;
        assert_eq!(session.context.team, TeamKey::RedBull);
        assert_eq!(session.context.teammate, "Liam Lawson");
    }

    #[tokio::test]
    async fn end_and_evict() {
        let store = ContextStore::new(profile());
        store.get_or_create("a").await;
        store.get_or_create("b").await;
        assert!(store.end("a").await);
        assert!(!store.end("a").await);
        assert!(store.get("a").await.is_none());

        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 0);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.evict_idle(Duration::from_millis(5)).await, 1);
        assert!(store.is_empty().await);
    }
}
