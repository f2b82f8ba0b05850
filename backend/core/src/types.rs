use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PaddockError;

/// Team keys of the fixed 2025 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamKey {
    RedBull,
    Ferrari,
    Mercedes,
    #[default]
    Mclaren,
    AstonMartin,
    Alpine,
    Williams,
    RacingBulls,
    Haas,
}

impl TeamKey {
    pub const ALL: [TeamKey; 9] = [
        TeamKey::RedBull,
        TeamKey::Ferrari,
        TeamKey::Mercedes,
        TeamKey::Mclaren,
        TeamKey::AstonMartin,
        TeamKey::Alpine,
        TeamKey::Williams,
        TeamKey::RacingBulls,
        TeamKey::Haas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamKey::RedBull => "red_bull",
            TeamKey::Ferrari => "ferrari",
            TeamKey::Mercedes => "mercedes",
            TeamKey::Mclaren => "mclaren",
            TeamKey::AstonMartin => "aston_martin",
            TeamKey::Alpine => "alpine",
            TeamKey::Williams => "williams",
            TeamKey::RacingBulls => "racing_bulls",
            TeamKey::Haas => "haas",
        }
    }
}

impl FromStr for TeamKey {
    type Err = PaddockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| PaddockError::validation(format!("invalid team: {s}")))
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sessions that make up a race weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Fp1,
    Fp2,
    Fp3,
    SprintShootout,
    SprintRace,
    Qualifying,
    Race,
}

impl SessionType {
    pub const ALL: [SessionType; 7] = [
        SessionType::Fp1,
        SessionType::Fp2,
        SessionType::Fp3,
        SessionType::SprintShootout,
        SessionType::SprintRace,
        SessionType::Qualifying,
        SessionType::Race,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Fp1 => "fp1",
            SessionType::Fp2 => "fp2",
            SessionType::Fp3 => "fp3",
            SessionType::SprintShootout => "sprint_shootout",
            SessionType::SprintRace => "sprint_race",
            SessionType::Qualifying => "qualifying",
            SessionType::Race => "race",
        }
    }

    /// Human-readable label ("FP1", "Sprint Shootout", ...).
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Fp1 => "FP1",
            SessionType::Fp2 => "FP2",
            SessionType::Fp3 => "FP3",
            SessionType::SprintShootout => "Sprint Shootout",
            SessionType::SprintRace => "Sprint Race",
            SessionType::Qualifying => "Qualifying",
            SessionType::Race => "Race",
        }
    }

    pub fn hashtag(&self) -> String {
        format!("#{}", self.as_str().to_uppercase())
    }

    pub fn is_practice(&self) -> bool {
        matches!(self, SessionType::Fp1 | SessionType::Fp2 | SessionType::Fp3)
    }

    /// Weekend phase the agent is in while this session runs.
    pub fn phase(&self) -> WeekendPhase {
        match self {
            SessionType::Fp1 | SessionType::Fp2 | SessionType::Fp3 => WeekendPhase::Practice,
            SessionType::SprintShootout | SessionType::Qualifying => WeekendPhase::Qualifying,
            SessionType::SprintRace | SessionType::Race => WeekendPhase::RaceDay,
        }
    }
}

impl FromStr for SessionType {
    type Err = PaddockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| PaddockError::validation(format!("invalid session: {s}")))
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse state of the agent across a weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekendPhase {
    #[default]
    PreWeekend,
    Practice,
    Qualifying,
    RaceDay,
    PostRace,
    OffSeason,
}

/// Weekend format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekendType {
    #[default]
    #[serde(alias = "standard_weekend")]
    Standard,
    #[serde(alias = "sprint_weekend")]
    Sprint,
}

impl WeekendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekendType::Standard => "standard",
            WeekendType::Sprint => "sprint",
        }
    }
}

impl FromStr for WeekendType {
    type Err = PaddockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "standard" | "standard_weekend" => Ok(WeekendType::Standard),
            "sprint" | "sprint_weekend" => Ok(WeekendType::Sprint),
            other => Err(PaddockError::validation(format!(
                "invalid weekend type: {other}"
            ))),
        }
    }
}

impl fmt::Display for WeekendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Driver mood vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Ecstatic,
    Satisfied,
    #[default]
    Neutral,
    Disappointed,
    Frustrated,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Ecstatic,
        Mood::Satisfied,
        Mood::Neutral,
        Mood::Disappointed,
        Mood::Frustrated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Ecstatic => "ecstatic",
            Mood::Satisfied => "satisfied",
            Mood::Neutral => "neutral",
            Mood::Disappointed => "disappointed",
            Mood::Frustrated => "frustrated",
        }
    }

    /// Mood after finishing a session in `position`.
    pub fn from_position(position: u8) -> Self {
        match position {
            0..=3 => Mood::Ecstatic,
            4..=6 => Mood::Satisfied,
            7..=10 => Mood::Neutral,
            11..=15 => Mood::Disappointed,
            _ => Mood::Frustrated,
        }
    }

    pub fn is_downbeat(&self) -> bool {
        matches!(self, Mood::Disappointed | Mood::Frustrated)
    }
}

impl FromStr for Mood {
    type Err = PaddockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| PaddockError::validation(format!("invalid mood: {s}")))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of text the Speak capability produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Post,
    Reply,
    StatusUpdate,
    Mention,
}

impl MessageType {
    pub const ALL: [MessageType; 4] = [
        MessageType::Post,
        MessageType::Reply,
        MessageType::StatusUpdate,
        MessageType::Mention,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Post => "post",
            MessageType::Reply => "reply",
            MessageType::StatusUpdate => "status_update",
            MessageType::Mention => "mention",
        }
    }
}

impl FromStr for MessageType {
    type Err = PaddockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| PaddockError::Generation(format!("unsupported message type: {s}")))
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity of a fan comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Bucket a compound score in [-1, 1] using the ±0.05 cutoffs.
    pub fn from_compound(score: f64) -> Self {
        if score >= 0.05 {
            Sentiment::Positive
        } else if score <= -0.05 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a weekend ended, judged by the final classified position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishTier {
    Podium,
    Points,
    Finish,
}

impl FinishTier {
    pub fn from_position(position: u8) -> Self {
        match position {
            0..=3 => FinishTier::Podium,
            4..=10 => FinishTier::Points,
            _ => FinishTier::Finish,
        }
    }

    pub fn summary(&self, position: u8) -> String {
        match self {
            FinishTier::Podium => format!("Fantastic weekend! P{position} finish! 🏆"),
            FinishTier::Points => {
                format!("Solid points finish in P{position}. Good team effort!")
            }
            FinishTier::Finish => {
                format!("Tough weekend, P{position}. We'll bounce back stronger!")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_parses_case_insensitively() {
        assert_eq!("FP2".parse::<SessionType>().unwrap(), SessionType::Fp2);
        assert_eq!(
            "sprint_shootout".parse::<SessionType>().unwrap(),
            SessionType::SprintShootout
        );
        assert!(matches!(
            "warmup".parse::<SessionType>(),
            Err(PaddockError::Validation(_))
        ));
    }

    #[test]
    fn unknown_message_type_is_a_generation_error() {
        assert!(matches!(
            "reaction".parse::<MessageType>(),
            Err(PaddockError::Generation(_))
        ));
        assert_eq!(
            "status_update".parse::<MessageType>().unwrap(),
            MessageType::StatusUpdate
        );
    }

    #[test]
    fn weekend_type_accepts_legacy_names() {
        assert_eq!(
            "standard_weekend".parse::<WeekendType>().unwrap(),
            WeekendType::Standard
        );
        assert_eq!("sprint".parse::<WeekendType>().unwrap(), WeekendType::Sprint);
        let parsed: WeekendType = serde_json::from_str("\"sprint_weekend\"").unwrap();
        assert_eq!(parsed, WeekendType::Sprint);
        assert!("triple_header".parse::<WeekendType>().is_err());
    }

    #[test]
    fn finish_tier_boundaries() {
        assert_eq!(FinishTier::from_position(1), FinishTier::Podium);
        assert_eq!(FinishTier::from_position(3), FinishTier::Podium);
        assert_eq!(FinishTier::from_position(4), FinishTier::Points);
        assert_eq!(FinishTier::from_position(10), FinishTier::Points);
        assert_eq!(FinishTier::from_position(11), FinishTier::Finish);
        assert!(FinishTier::Podium.summary(2).contains("P2"));
    }

    #[test]
    fn mood_follows_position_bands() {
        assert_eq!(Mood::from_position(3), Mood::Ecstatic);
        assert_eq!(Mood::from_position(6), Mood::Satisfied);
        assert_eq!(Mood::from_position(10), Mood::Neutral);
        assert_eq!(Mood::from_position(15), Mood::Disappointed);
        assert_eq!(Mood::from_position(16), Mood::Frustrated);
    }

    #[test]
    fn sentiment_cutoffs() {
        assert_eq!(Sentiment::from_compound(0.05), Sentiment::Positive);
        assert_eq!(Sentiment::from_compound(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(-0.05), Sentiment::Negative);
    }

    #[test]
    fn unknown_team_is_rejected() {
        assert_eq!(" aston_martin ".parse::<TeamKey>().unwrap(), TeamKey::AstonMartin);
        assert!("brawn_gp".parse::<TeamKey>().is_err());
    }
}
