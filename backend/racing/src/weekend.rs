//! Race weekend schedules.

use serde::Serialize;

use paddock_core::{MessageType, SessionType, WeekendType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Day {
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduledSession {
    pub session: SessionType,
    pub day: Day,
}

const fn slot(session: SessionType, day: Day) -> ScheduledSession {
    ScheduledSession { session, day }
}

static STANDARD: [ScheduledSession; 5] = [
    slot(SessionType::Fp1, Day::Friday),
    slot(SessionType::Fp2, Day::Friday),
    slot(SessionType::Fp3, Day::Saturday),
    slot(SessionType::Qualifying, Day::Saturday),
    slot(SessionType::Race, Day::Sunday),
];

static SPRINT: [ScheduledSession; 5] = [
    slot(SessionType::Fp1, Day::Friday),
    slot(SessionType::SprintShootout, Day::Friday),
    slot(SessionType::SprintRace, Day::Saturday),
    slot(SessionType::Qualifying, Day::Saturday),
    slot(SessionType::Race, Day::Sunday),
];

/// Ordered sessions for a weekend format.
pub fn schedule(weekend_type: WeekendType) -> &'static [ScheduledSession] {
    match weekend_type {
        WeekendType::Standard => &STANDARD,
        WeekendType::Sprint => &SPRINT,
    }
}

/// Message the driver posts after a session: a quick status during
/// practice, a full post once something is at stake.
pub fn message_type_for(session: SessionType) -> MessageType {
    if session.is_practice() {
        MessageType::StatusUpdate
    } else {
        MessageType::Post
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_weekend_order() {
        let sessions: Vec<_> = schedule(WeekendType::Standard)
            .iter()
            .map(|s| s.session)
            .collect();
        assert_eq!(
            sessions,
            vec![
                SessionType::Fp1,
                SessionType::Fp2,
                SessionType::Fp3,
                SessionType::Qualifying,
                SessionType::Race
            ]
        );
    }

    #[test]
    fn sprint_weekend_runs_shootout_before_sprint_race() {
        let sprint = schedule(WeekendType::Sprint);
        assert_eq!(sprint.len(), 5);
        assert_eq!(sprint[1].session, SessionType::SprintShootout);
        assert_eq!(sprint[2].session, SessionType::SprintRace);
        assert_eq!(sprint[2].day, Day::Saturday);
        assert_eq!(sprint[4].day, Day::Sunday);
    }

    #[test]
    fn practice_produces_status_updates() {
        assert_eq!(message_type_for(SessionType::Fp3), MessageType::StatusUpdate);
        assert_eq!(message_type_for(SessionType::Qualifying), MessageType::Post);
    }
}
