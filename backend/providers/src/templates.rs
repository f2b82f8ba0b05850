//! Deterministic template generation.
//!
//! Used on its own when no model is configured and as the fallback whenever
//! the model path fails. The same request always yields the same text.

use anyhow::Result;
use async_trait::async_trait;

use paddock_core::{GenerationRequest, MessageType, Mood, Sentiment, SessionType, TextGenerator};

const VICTORY: &[&str] = &[
    "YES! What a race! Huge thanks to the team for the amazing car. We pushed hard and it paid off. #Winner #TeamWork",
    "INCREDIBLE! P1 at {circuit}! This feeling never gets old. Massive effort from everyone in the garage. #Victory",
    "Perfect race! The car was amazing today and the strategy was spot on. Thank you to all the fans! #P1",
];

const PODIUM: &[&str] = &[
    "On the podium! Great team work and solid execution today. Building momentum for the next one! #Podium",
    "P{position} feels amazing! Good points for the team and we're moving in the right direction. #Progress",
    "Solid result at {circuit}! The car felt good and we maximized our potential. Onwards! #TeamWork",
];

const DIFFICULT: &[&str] = &[
    "Not the result we wanted today. Gave it my all out there, but things didn't go our way. We'll analyze and come back stronger. #NeverGiveUp",
    "Tough day at the office. These setbacks make us stronger. Time to regroup and focus on the next one. #Resilience",
    "Disappointing P{position} but that's motor racing. The team did everything they could. We'll bounce back! #TeamSpirit",
];

const PRACTICE: &[&str] = &[
    "Getting some good laps in during practice. Feeling comfortable with the car setup. Let's keep pushing! #Practice",
    "Solid running at {circuit} today. Learning the track and finding the limit. Ready for tomorrow! #FreePractice",
    "Good data collection during practice. The car balance is coming together nicely. #Preparation",
];

const QUALIFYING: &[&str] = &[
    "Qualifying done! Every tenth counts out there. Gave it everything in that final sector. #Quali",
    "That's qualifying in the books. Tight margins today but we're in a good position. #GridPosition",
    "Qualifying session complete. The car felt good on the final run. Looking forward to the race! #Qualifying",
];

const GENERIC: &[&str] = &[
    "Focus and determination. That's what it takes out there. Ready for the challenge! #F1Life",
    "Another day, another opportunity to push the limits. Grateful for this journey! #Racing",
    "The track is calling. Time to give everything we've got! #NeverSettle",
];

const REPLY_POSITIVE: &[&str] = &[
    "Thank you so much! Your support means the world to the whole team. 🙌",
    "Appreciate it! Messages like this keep us pushing every lap. #TeamWork",
    "Cheers! Loved feeling the energy from the fans at {circuit}. See you at the next one!",
];

const REPLY_NEUTRAL: &[&str] = &[
    "Thanks for the message! Plenty of work going on behind the scenes. Stay tuned!",
    "Good question! We're learning every session and the team is on it. 👊",
    "Thanks for following along! More to come this weekend. #F1",
];

const REPLY_NEGATIVE: &[&str] = &[
    "Hear you. Not our best day, but we'll learn from it and come back stronger. 💪",
    "Fair point. We know where we need to improve and the whole team is on it.",
    "Tough one for sure. We stay together as a team and keep pushing. Thanks for sticking with us.",
];

const MENTION: &[&str] = &[
    "Great battle out there today! Respect on track, always. #Racing",
    "Huge shoutout for all the hard work this weekend at {circuit}. #TeamWork",
    "Always good sharing the track with legends. Let's go again next round! #F1",
    "Working hand in hand with {teammate} all weekend. This is a team sport. #TeamMates",
];

/// Picks from fixed template banks by message type, mood, and session.
#[derive(Debug, Default, Clone)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    fn bank(request: &GenerationRequest) -> &'static [&'static str] {
        match request.message_type {
            MessageType::Reply => match request.sentiment.unwrap_or(Sentiment::Neutral) {
                Sentiment::Positive => REPLY_POSITIVE,
                Sentiment::Neutral => REPLY_NEUTRAL,
                Sentiment::Negative => REPLY_NEGATIVE,
            },
            MessageType::Mention => MENTION,
            MessageType::Post | MessageType::StatusUpdate => {
                let race_like = matches!(
                    request.session,
                    Some(SessionType::Race) | Some(SessionType::SprintRace)
                );
                if race_like && request.last_position == Some(1) {
                    VICTORY
                } else if request.mood == Mood::Ecstatic {
                    PODIUM
                } else if request.mood.is_downbeat() {
                    DIFFICULT
                } else {
                    match request.session {
                        Some(s) if s.is_practice() => PRACTICE,
                        Some(SessionType::Qualifying) | Some(SessionType::SprintShootout) => {
                            QUALIFYING
                        }
                        _ => GENERIC,
                    }
                }
            }
        }
    }

    /// Render synchronously; the async trait method delegates here.
    pub fn render(&self, request: &GenerationRequest) -> String {
        let bank = Self::bank(request);
        let template = bank[request.variant % bank.len()];
        let position = request
            .last_position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        template
            .replace("{circuit}", &request.circuit_name)
            .replace("{teammate}", &request.teammate)
            .replace("{position}", &position)
    }
}

#[async_trait]
impl TextGenerator for TemplateGenerator {
    fn name(&self) -> &str {
        "templates"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        Ok(self.render(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message_type: MessageType, mood: Mood) -> GenerationRequest {
        GenerationRequest {
            prompt: String::new(),
            message_type,
            mood,
            session: None,
            last_position: None,
            sentiment: None,
            circuit_name: "Circuit de Monaco".into(),
            teammate: "Oscar Piastri".into(),
            variant: 0,
        }
    }

    #[test]
    fn same_request_same_text() {
        let generator = TemplateGenerator::new();
        let req = request(MessageType::Post, Mood::Neutral);
        assert_eq!(generator.render(&req), generator.render(&req));
    }

    #[test]
    fn race_win_uses_victory_bank() {
        let mut req = request(MessageType::Post, Mood::Ecstatic);
        req.session = Some(SessionType::Race);
        req.last_position = Some(1);
        req.variant = 1;
        assert_eq!(
            TemplateGenerator::new().render(&req),
            "INCREDIBLE! P1 at Circuit de Monaco! This feeling never gets old. Massive effort from everyone in the garage. #Victory"
        );
    }

    #[test]
    fn frustrated_mood_sounds_difficult() {
        let mut req = request(MessageType::StatusUpdate, Mood::Frustrated);
        req.last_position = Some(17);
        req.variant = 2;
        assert!(TemplateGenerator::new().render(&req).starts_with("Disappointing P17"));
    }

    #[test]
    fn reply_follows_sentiment() {
        let mut req = request(MessageType::Reply, Mood::Neutral);
        req.sentiment = Some(Sentiment::Negative);
        assert!(REPLY_NEGATIVE.contains(&TemplateGenerator::new().render(&req).as_str()));
    }

    #[test]
    fn placeholders_are_filled() {
        let mut req = request(MessageType::Mention, Mood::Neutral);
        req.variant = 3;
        let text = TemplateGenerator::new().render(&req);
        assert!(text.contains("Oscar Piastri"));
        assert!(!text.contains('{'));
    }

    #[test]
    fn every_template_fits_a_post() {
        for bank in [
            VICTORY, PODIUM, DIFFICULT, PRACTICE, QUALIFYING, GENERIC, REPLY_POSITIVE,
            REPLY_NEUTRAL, REPLY_NEGATIVE, MENTION,
        ] {
            for template in bank {
                assert!(template.chars().count() <= 200, "{template}");
            }
        }
    }
}
