//! Think: inspect, update, analyse, and reset the session context.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use paddock_core::{AgentContext, Mood, PaddockError, Result, SessionType};
use paddock_logging::{AgentEvent, EventLogger};
use paddock_racing::{Difficulty, circuit, require_circuit, team};

use crate::dispatcher::Dispatcher;
use crate::history::{ActionKind, ActionRecord, MemoryEntry};
use crate::session::AgentSession;
use crate::store::AgentProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitDetails {
    pub name: &'static str,
    pub country: &'static str,
    pub length_km: f64,
    pub corners: u8,
    pub characteristics: &'static [&'static str],
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub actions_performed: usize,
    pub messages_spoken: usize,
    pub last_action: Option<ActionKind>,
}

/// Read-only view of a session's context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSnapshot {
    #[serde(flatten)]
    pub context: AgentContext,
    pub team_name: &'static str,
    pub circuit_details: Option<CircuitDetails>,
    pub activity: Activity,
}

/// Fields a client may change. Blank strings count as omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextPatch {
    #[serde(default, alias = "current_circuit")]
    pub circuit: Option<String>,
    #[serde(default, alias = "current_session")]
    pub session: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    Excellent,
    Good,
    Challenging,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    pub performance_trend: PerformanceTrend,
    pub key_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionExport {
    pub context: AgentContext,
    pub action_history: Vec<ActionRecord>,
    pub conversation_memory: Vec<MemoryEntry>,
    pub export_timestamp: DateTime<Utc>,
}

impl Dispatcher {
    /// Snapshot of the context with circuit details and activity counters.
    /// Calling it twice without changes in between gives equal snapshots.
    pub fn think_get_context(&self, session: &AgentSession) -> ContextSnapshot {
        let circuit_details = circuit(&session.context.current_circuit).map(|c| CircuitDetails {
            name: c.name,
            country: c.country,
            length_km: c.length_km,
            corners: c.corners,
            characteristics: c.characteristics,
            difficulty: c.difficulty,
        });
        ContextSnapshot {
            context: session.context.clone(),
            team_name: team(session.context.team).name,
            circuit_details,
            activity: Activity {
                actions_performed: session.history.len(),
                messages_spoken: session.messages_spoken,
                last_action: session.history.last().map(|a| a.kind),
            },
        }
    }

    /// Validate every provided field, then apply them all. Nothing changes
    /// if any field is invalid.
    pub fn think_update_context(
        &self,
        session: &mut AgentSession,
        patch: &ContextPatch,
    ) -> Result<BTreeMap<&'static str, String>> {
        let circuit_key = provided(&patch.circuit)
            .map(|key| require_circuit(key).map(|c| c.key))
            .transpose()?;
        let current_session = provided(&patch.session)
            .map(str::parse::<SessionType>)
            .transpose()?;
        let mood = provided(&patch.mood).map(str::parse::<Mood>).transpose()?;

        let mut updates = BTreeMap::new();
        if let Some(key) = circuit_key {
            session.context.current_circuit = key.to_string();
            updates.insert("current_circuit", key.to_string());
        }
        if let Some(s) = current_session {
            session.context.current_session = Some(s);
            updates.insert("current_session", s.to_string());
        }
        if let Some(m) = mood {
            session.context.mood = m;
            updates.insert("mood", m.to_string());
        }

        if updates.is_empty() {
            return Err(PaddockError::validation("no valid updates provided"));
        }
        info!(session_id = %session.id, ?updates, "Context updated");
        EventLogger::log_event(
            &session.id,
            AgentEvent::ContextUpdate {
                fields: updates.keys().map(|k| k.to_string()).collect(),
            },
        );
        Ok(updates)
    }

    /// Trend from the last result, recommendations from the circuit layout.
    pub fn think_analyze_performance(&self, session: &AgentSession) -> PerformanceAnalysis {
        let mut analysis = PerformanceAnalysis {
            performance_trend: PerformanceTrend::Stable,
            key_strengths: Vec::new(),
            areas_for_improvement: Vec::new(),
            recommendations: Vec::new(),
        };

        if let Some(result) = &session.context.last_result {
            match result.position {
                0..=3 => {
                    analysis.performance_trend = PerformanceTrend::Excellent;
                    analysis.key_strengths.push("strong pace".into());
                }
                4..=10 => {
                    analysis.performance_trend = PerformanceTrend::Good;
                    analysis.key_strengths.push("consistent points scoring".into());
                }
                _ => {
                    analysis.performance_trend = PerformanceTrend::Challenging;
                    analysis.areas_for_improvement.push("qualifying performance".into());
                }
            }
        }

        if let Some(c) = circuit(&session.context.current_circuit) {
            if c.has("technical") {
                analysis.recommendations.push("Focus on setup optimization".into());
            }
            if c.has("high-speed") {
                analysis.recommendations.push("Maximize straight-line speed".into());
            }
            if c.has("street-circuit") {
                analysis
                    .recommendations
                    .push("Practice precision in tight sections".into());
            }
        }
        analysis
    }

    /// Start the session over. With `keep_driver` the driver and team
    /// survive; otherwise the configured defaults come back. History and
    /// memory are cleared either way.
    pub fn think_reset(&self, session: &mut AgentSession, keep_driver: bool, defaults: &AgentProfile) {
        let profile = if keep_driver {
            AgentProfile {
                driver_name: session.context.driver_name.clone(),
                team: session.context.team,
                ..defaults.clone()
            }
        } else {
            defaults.clone()
        };
        session.context = profile.build_context();
        session.history.clear();
        session.memory.clear();
        session.messages_spoken = 0;
        info!(session_id = %session.id, keep_driver, "Context reset");
    }

    /// Newest `limit` actions, oldest first.
    pub fn history(&self, session: &AgentSession, limit: Option<usize>) -> Vec<ActionRecord> {
        session.history.recent(limit)
    }

    /// Newest `limit` spoken messages, oldest first.
    pub fn memory(&self, session: &AgentSession, limit: Option<usize>) -> Vec<MemoryEntry> {
        session.memory.recent(limit)
    }

    pub fn export(&self, session: &AgentSession) -> SessionExport {
        SessionExport {
            context: session.context.clone(),
            action_history: session.history.recent(None),
            conversation_memory: session.memory.recent(None),
            export_timestamp: Utc::now(),
        }
    }
}
