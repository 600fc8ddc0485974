//! Deterministic rule-based scorer, the terminal strategy in the chain.
//!
//! Always available, never fails, bit-reproducible. All adjustments are
//! additive and each keyword category fires at most once, so evaluation
//! order does not matter.

use async_trait::async_trait;

use crate::error::StrategyError;
use crate::scorer::Scorer;

const BOT_KEYWORDS: [&str; 6] = ["click", "buy", "offer", "deal", "free", "urgent"];
const HUMAN_KEYWORDS: [&str; 4] = ["hello", "hi", "thanks", "please"];

/// Score a text with the fixed rule set, clamped to [0, 1].
pub fn heuristic_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let char_len = text.chars().count();
    let mut score: f64 = 0.5;

    if char_len > 100 {
        score += 0.2;
    }
    if lower.contains("http") || lower.contains("www.") {
        score += 0.3;
    }
    if is_shouting(text) && char_len > 20 {
        score += 0.2;
    }
    if BOT_KEYWORDS.iter().any(|w| lower.contains(w)) {
        score += 0.1;
    }
    if HUMAN_KEYWORDS.iter().any(|w| lower.contains(w)) {
        score -= 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// True when the text has at least one cased character and none of its
/// cased characters are lowercase.
fn is_shouting(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Rule-based strategy wrapper around `heuristic_score`.
#[derive(Debug, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Scorer for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn score(&self, text: &str) -> Result<f64, StrategyError> {
        Ok(heuristic_score(text))
    }

    async fn probe(&self) -> bool {
        true
    }
}
