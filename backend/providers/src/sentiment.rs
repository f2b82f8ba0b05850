//! Lexicon-based sentiment scoring for fan comments.
//!
//! A compact valence-lexicon scorer in the VADER mould: per-word valence,
//! negation flips within a short window, intensity boosters, and
//! exclamation emphasis, normalised into a compound score in [-1, 1].

use anyhow::Result;
use async_trait::async_trait;

use paddock_core::{Sentiment, SentimentClassifier};

const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NEGATION_WINDOW: usize = 3;
const NORMALIZATION_ALPHA: f64 = 15.0;

const LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("brilliant", 2.8),
    ("champion", 2.9),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("incredible", 2.6),
    ("legend", 2.3),
    ("love", 3.2),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("proud", 2.1),
    ("respect", 2.1),
    ("strong", 2.3),
    ("superb", 3.1),
    ("support", 1.7),
    ("thanks", 1.9),
    ("well", 1.1),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("crash", -1.7),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("embarrassing", -1.6),
    ("fail", -2.5),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("joke", -1.2),
    ("lose", -1.9),
    ("loser", -2.4),
    ("mess", -1.5),
    ("pathetic", -2.3),
    ("poor", -2.1),
    ("sad", -2.1),
    ("slow", -1.0),
    ("terrible", -2.5),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worst", -3.1),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "cannot", "cant", "can't", "dont",
    "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt", "isn't", "wasnt", "wasn't",
    "wont", "won't", "aint", "ain't",
];

const BOOSTERS: &[&str] = &[
    "absolutely", "really", "so", "very", "extremely", "incredibly", "totally", "super",
    "truly", "hugely",
];

/// Rule-based classifier that needs no network access.
#[derive(Debug, Default, Clone)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Compound score in [-1, 1].
    pub fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|t| {
                t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|t| !t.is_empty())
            .collect();

        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(valence) = valence(token) else {
                continue;
            };
            let mut score = valence;

            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            if let Some(prev) = window.last() {
                if BOOSTERS.contains(&prev.as_str()) {
                    score += BOOSTER_INCREMENT * score.signum();
                }
            }
            if window.iter().any(|w| NEGATIONS.contains(&w.as_str())) {
                score *= NEGATION_SCALAR;
            }
            sum += score;
        }

        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS);
            sum += EXCLAMATION_INCREMENT * bangs as f64 * sum.signum();
        }

        normalize(sum)
    }
}

fn valence(token: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, v)| *v)
}

fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        Ok(Sentiment::from_compound(self.compound(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn praise_is_positive() {
        let c = LexiconClassifier::new();
        let s = c.classify("Great drive today, you are a legend!").await.unwrap();
        assert_eq!(s, Sentiment::Positive);
    }

    #[tokio::test]
    async fn criticism_is_negative() {
        let c = LexiconClassifier::new();
        let s = c.classify("That was a terrible strategy, worst race ever").await.unwrap();
        assert_eq!(s, Sentiment::Negative);
    }

    #[tokio::test]
    async fn plain_question_is_neutral() {
        let c = LexiconClassifier::new();
        let s = c.classify("What tyres are you starting on?").await.unwrap();
        assert_eq!(s, Sentiment::Neutral);
    }

    #[test]
    fn negation_flips_polarity() {
        let c = LexiconClassifier::new();
        assert!(c.compound("not good at all") < 0.0);
        assert!(c.compound("good") > 0.0);
    }

    #[test]
    fn boosters_and_exclamations_intensify() {
        let c = LexiconClassifier::new();
        let plain = c.compound("good race");
        assert!(c.compound("really good race") > plain);
        assert!(c.compound("good race!!") > plain);
    }

    #[test]
    fn compound_stays_bounded() {
        let c = LexiconClassifier::new();
        let text = "best best best best best best best best!!!!!!";
        assert!(c.compound(text) <= 1.0);
    }
}
