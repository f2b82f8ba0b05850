//! Per-session agent context.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::{Mood, SessionType, TeamKey, WeekendPhase, WeekendType};

/// Oldest incidents are evicted past this many entries.
pub const MAX_RECENT_INCIDENTS: usize = 5;

/// Result of a single practice, qualifying, or race session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub position: u8,
    /// `+s.mmm` behind the leader; `None` for P1.
    pub gap_to_leader: Option<String>,
    pub best_time: String,
    pub laps_completed: u32,
    #[serde(default)]
    pub incidents: Vec<String>,
}

/// Mutable state the agent reasons over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    pub driver_name: String,
    pub team: TeamKey,
    pub teammate: String,
    pub current_circuit: String,
    pub current_session: Option<SessionType>,
    pub phase: WeekendPhase,
    pub weekend_type: WeekendType,
    #[serde(default)]
    pub mood: Mood,
    pub last_result: Option<SessionResult>,
    recent_incidents: VecDeque<String>,
    pub championship_position: u8,
}

impl AgentContext {
    pub fn new(
        driver_name: impl Into<String>,
        team: TeamKey,
        teammate: impl Into<String>,
        circuit: impl Into<String>,
        championship_position: u8,
    ) -> Self {
        Self {
            driver_name: driver_name.into(),
            team,
            teammate: teammate.into(),
            current_circuit: circuit.into(),
            current_session: None,
            phase: WeekendPhase::PreWeekend,
            weekend_type: WeekendType::Standard,
            mood: Mood::Neutral,
            last_result: None,
            recent_incidents: VecDeque::with_capacity(MAX_RECENT_INCIDENTS),
            championship_position: championship_position.clamp(1, 20),
        }
    }

    /// Append an incident, dropping the oldest once the cap is reached.
    pub fn push_incident(&mut self, incident: impl Into<String>) {
        if self.recent_incidents.len() == MAX_RECENT_INCIDENTS {
            self.recent_incidents.pop_front();
        }
        self.recent_incidents.push_back(incident.into());
    }

    pub fn recent_incidents(&self) -> impl Iterator<Item = &str> {
        self.recent_incidents.iter().map(String::as_str)
    }

    pub fn incident_count(&self) -> usize {
        self.recent_incidents.len()
    }

    /// Enter a session, moving the weekend phase along with it.
    pub fn enter_session(&mut self, session: SessionType) {
        self.current_session = Some(session);
        self.phase = session.phase();
    }

    /// Record a session result and let it drive mood and incidents.
    pub fn record_result(&mut self, result: SessionResult) {
        self.mood = Mood::from_position(result.position);
        let skip = result.incidents.len().saturating_sub(2);
        for incident in result.incidents.iter().skip(skip) {
            self.push_incident(incident.clone());
        }
        self.last_result = Some(result);
    }
}
