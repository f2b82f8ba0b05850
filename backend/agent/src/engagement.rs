//! Simulated engagement counts for posts.

use std::ops::RangeInclusive;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use paddock_core::Mood;

pub const ENGAGEMENT_RANGE: RangeInclusive<u32> = 100..=10_000;

/// Decides how many interactions a post receives.
pub trait EngagementPolicy: Send + Sync {
    fn engagement(&self, mood: Mood) -> u32;
}

/// Uniform draw from [`ENGAGEMENT_RANGE`], scaled by mood and clamped back
/// into the range. Happy drivers post things people like.
pub struct MoodWeightedEngagement {
    rng: Mutex<StdRng>,
}

impl MoodWeightedEngagement {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MoodWeightedEngagement {
    fn default() -> Self {
        Self::new()
    }
}

fn mood_multiplier(mood: Mood) -> f64 {
    match mood {
        Mood::Ecstatic => 1.5,
        Mood::Satisfied => 1.2,
        Mood::Neutral => 1.0,
        Mood::Disappointed => 0.8,
        Mood::Frustrated => 0.7,
    }
}

impl EngagementPolicy for MoodWeightedEngagement {
    fn engagement(&self, mood: Mood) -> u32 {
        let base = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(ENGAGEMENT_RANGE),
            Err(poisoned) => poisoned.into_inner().gen_range(ENGAGEMENT_RANGE),
        };
        let scaled = (f64::from(base) * mood_multiplier(mood)).round() as u32;
        scaled.clamp(*ENGAGEMENT_RANGE.start(), *ENGAGEMENT_RANGE.end())
    }
}

/// Always the same count.
pub struct FixedEngagement(pub u32);

impl EngagementPolicy for FixedEngagement {
    fn engagement(&self, _mood: Mood) -> u32 {
        self.0
    }
}
