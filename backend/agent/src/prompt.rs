//! Persona prompt builder.

use std::fmt::Write;

use paddock_core::{AgentContext, MessageType, Sentiment};
use paddock_racing::{circuit, team};

pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the user prompt describing who is speaking and in what situation.
    pub fn build(
        context: &AgentContext,
        message_type: MessageType,
        custom_context: Option<&str>,
    ) -> String {
        let team = team(context.team);
        let session = context
            .current_session
            .map(|s| s.label())
            .unwrap_or("between sessions");

        let mut prompt = format!(
            "You are {}, a Formula 1 driver for {}.\n",
            context.driver_name, team.name
        );
        match circuit(&context.current_circuit) {
            Some(c) => {
                let _ = writeln!(prompt, "Current circuit: {} ({})", c.name, c.country);
                let _ = writeln!(
                    prompt,
                    "Circuit characteristics: {}",
                    c.characteristics.join(", ")
                );
                let _ = writeln!(prompt, "Circuit challenges: {}", c.challenges().join(", "));
            }
            None => {
                let _ = writeln!(prompt, "Current circuit: {}", context.current_circuit);
            }
        }
        let _ = writeln!(prompt, "Current session: {session}");
        let _ = writeln!(prompt, "Mood: {}", context.mood);
        let _ = writeln!(
            prompt,
            "Championship position: P{}",
            context.championship_position
        );
        let _ = writeln!(prompt, "Team mate: {}", context.teammate);

        let incidents: Vec<&str> = context.recent_incidents().collect();
        let incidents = if incidents.is_empty() {
            "None".to_string()
        } else {
            incidents.join(", ")
        };
        let _ = writeln!(prompt, "Recent incidents: {incidents}");
        if let Some(result) = &context.last_result {
            let _ = writeln!(
                prompt,
                "Last session result: P{}, {}",
                result.position, result.best_time
            );
        }

        let _ = write!(
            prompt,
            "\nWrite one {} in the driver's voice. Use F1 terminology, show emotion \
             that fits the mood, include hashtags, keep it under 280 characters, and \
             return only the message.",
            describe(message_type)
        );
        if let Some(extra) = custom_context.map(str::trim).filter(|s| !s.is_empty()) {
            let _ = write!(prompt, "\n\nSpecific context: {extra}");
        }
        prompt
    }

    /// Extra context for replying to a fan.
    pub fn reply_context(comment: &str, sentiment: Sentiment) -> String {
        format!(
            "A fan commented: \"{comment}\". The sentiment is {sentiment}. \
             Acknowledge the fan, stay positive and professional, keep it under 150 characters."
        )
    }

    /// Extra context for mentioning someone.
    pub fn mention_context(person: &str, tag: &str) -> String {
        format!(
            "Mention {person} naturally in the message. Context: {tag}. \
             Keep it authentic and professional."
        )
    }
}

fn describe(message_type: MessageType) -> &'static str {
    match message_type {
        MessageType::Post => "social media post",
        MessageType::Reply => "reply to a fan",
        MessageType::StatusUpdate => "short status update",
        MessageType::Mention => "post mentioning someone",
    }
}
