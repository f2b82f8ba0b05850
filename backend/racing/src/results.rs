//! Session result generation.
//!
//! Positions are bounded by the team's performance tier; everything else
//! (gaps, lap times, incidents) is flavour. Generation is a policy so the
//! simulation can run against scripted results.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use paddock_core::{SessionResult, SessionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    TopTeam,
    Midfield,
    Backmarker,
}

impl PerformanceTier {
    pub fn position_range(&self) -> RangeInclusive<u8> {
        match self {
            PerformanceTier::TopTeam => 1..=6,
            PerformanceTier::Midfield => 7..=15,
            PerformanceTier::Backmarker => 16..=20,
        }
    }
}

/// Produces the result of one simulated session.
pub trait ResultPolicy: Send + Sync {
    fn generate(&self, session: SessionType, tier: PerformanceTier) -> SessionResult;
}

const QUALIFYING_GAPS_MS: [u32; 9] = [0, 123, 287, 445, 567, 789, 1234, 1567, 2123];
const POLE_LAP_MS: u32 = 83_456;

const INCIDENT_POOL: [&str; 5] = [
    "lock-up turn 1",
    "flat-spot front left",
    "off-track limits turn 4",
    "yellow flag sector 2",
    "traffic in final sector",
];

/// `m:ss.mmm`
pub fn format_lap_time(ms: u32) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

fn format_gap(ms: u32) -> String {
    format!("+{}.{:03}", ms / 1000, ms % 1000)
}

/// Random results within the tier's position band.
pub struct RandomResultPolicy {
    rng: Mutex<StdRng>,
}

impl RandomResultPolicy {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomResultPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultPolicy for RandomResultPolicy {
    fn generate(&self, session: SessionType, tier: PerformanceTier) -> SessionResult {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let position = rng.gen_range(tier.position_range());

        let (gap_ms, best_ms, laps) = match session {
            SessionType::Qualifying | SessionType::SprintShootout => {
                let idx = usize::from(position - 1).min(QUALIFYING_GAPS_MS.len() - 1);
                let gap = QUALIFYING_GAPS_MS[idx];
                let laps = if session == SessionType::Qualifying {
                    rng.gen_range(8..=12)
                } else {
                    rng.gen_range(6..=9)
                };
                (gap, POLE_LAP_MS + gap, laps)
            }
            _ => {
                let gap = rng.gen_range(100..=3000);
                let best = rng.gen_range(82_100..=86_999);
                let laps = match session {
                    SessionType::Race => rng.gen_range(50..=70),
                    SessionType::SprintRace => rng.gen_range(17..=24),
                    _ => rng.gen_range(15..=35),
                };
                (gap, best, laps)
            }
        };

        let incident_count = rng.gen_range(0..=2);
        let incidents = INCIDENT_POOL
            .choose_multiple(&mut *rng, incident_count)
            .map(|s| s.to_string())
            .collect();

        SessionResult {
            position,
            gap_to_leader: (position > 1).then(|| format_gap(gap_ms)),
            best_time: format_lap_time(best_ms),
            laps_completed: laps,
            incidents,
        }
    }
}

/// Replays a fixed list of positions, cycling when exhausted.
pub struct ScriptedResultPolicy {
    positions: Vec<u8>,
    incidents: Vec<String>,
    cursor: AtomicUsize,
}

impl ScriptedResultPolicy {
    pub fn new(positions: impl Into<Vec<u8>>) -> Self {
        let mut positions = positions.into();
        if positions.is_empty() {
            positions.push(10);
        }
        Self {
            positions,
            incidents: Vec::new(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Attach the same incidents to every generated result.
    pub fn with_incidents(mut self, incidents: Vec<String>) -> Self {
        self.incidents = incidents;
        self
    }
}

impl ResultPolicy for ScriptedResultPolicy {
    fn generate(&self, session: SessionType, _tier: PerformanceTier) -> SessionResult {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        let position = self.positions[i % self.positions.len()];
        let gap_ms = u32::from(position.saturating_sub(1)) * 250;
        SessionResult {
            position,
            gap_to_leader: (position > 1).then(|| format_gap(gap_ms)),
            best_time: format_lap_time(POLE_LAP_MS + gap_ms),
            laps_completed: if session.is_practice() { 24 } else { 12 },
            incidents: self.incidents.clone(),
        }
    }
}
