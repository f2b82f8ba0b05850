//! Weekend Simulation Runner.

use serde::Serialize;
use tracing::{info, instrument};

use paddock_core::{
    FinishTier, PaddockError, Result, SessionResult, SessionType, WeekendPhase, WeekendType,
};
use paddock_logging::{AgentEvent, EventLogger};
use paddock_racing::{Day, message_type_for, require_circuit, schedule, team};

use crate::dispatcher::Dispatcher;
use crate::session::AgentSession;

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub day: Day,
    pub session: SessionType,
    pub result: SessionResult,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekendReport {
    pub circuit: String,
    pub circuit_name: String,
    pub weekend_type: WeekendType,
    pub sessions: Vec<SessionReport>,
    pub final_status: String,
    pub final_tier: FinishTier,
}

impl Dispatcher {
    /// Run every session of a weekend in order, updating the context as
    /// the driver goes and speaking after each session.
    ///
    /// A blank `circuit_key` keeps the current circuit; a blank
    /// `weekend_type` means a standard weekend. Both are validated before
    /// anything changes.
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn simulate_weekend(
        &self,
        session: &mut AgentSession,
        circuit_key: &str,
        weekend_type: &str,
    ) -> Result<WeekendReport> {
        let circuit = match circuit_key.trim() {
            "" => require_circuit(&session.context.current_circuit)?,
            key => require_circuit(key)?,
        };
        let weekend_type = match weekend_type.trim() {
            "" => WeekendType::Standard,
            other => other.parse::<WeekendType>()?,
        };

        session.context.current_circuit = circuit.key.to_string();
        session.context.weekend_type = weekend_type;
        let tier = team(session.context.team).tier;

        let mut sessions = Vec::new();
        for slot in schedule(weekend_type) {
            session.context.enter_session(slot.session);
            let result = self.results.generate(slot.session, tier);
            session.context.record_result(result.clone());

            let spoken = self
                .speak(session, message_type_for(slot.session), None)
                .await?;
            info!(
                session = %slot.session,
                position = result.position,
                mood = %session.context.mood,
                "Session simulated"
            );
            sessions.push(SessionReport {
                day: slot.day,
                session: slot.session,
                result,
                message: spoken.message,
            });
        }

        let last_position = sessions
            .last()
            .map(|s| s.result.position)
            .ok_or_else(|| PaddockError::Generation("weekend has no sessions".into()))?;
        session.context.phase = WeekendPhase::PostRace;
        let final_tier = FinishTier::from_position(last_position);
        let final_status = final_tier.summary(last_position);

        EventLogger::log_event(
            &session.id,
            AgentEvent::Simulation {
                circuit: circuit.key.to_string(),
                weekend_type: weekend_type.to_string(),
                final_status: final_status.clone(),
            },
        );

        Ok(WeekendReport {
            circuit: circuit.key.to_string(),
            circuit_name: circuit.name.to_string(),
            weekend_type,
            sessions,
            final_status,
            final_tier,
        })
    }
}
