//! Generative-elicitation strategy.
//!
//! Asks the generative backend for a bare probability with a single user
//! instruction and parses the reply as a float. A reply that does not
//! parse as a number in [0, 1] counts as a strategy failure, not a value
//! to clamp; the backend was asked for a probability and gave something
//! else.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use botsense_llm::{ChatTurn, CompletionBackend};

use crate::error::StrategyError;
use crate::scorer::Scorer;

const ELICITATION_INSTRUCTION: &str = "Estimate the probability that the following message was \
written by a bot rather than a human. Answer with a single number between 0 and 1 and nothing \
else.\n\nMessage: ";

/// Strategy that elicits a probability from a generative backend.
pub struct ElicitationScorer {
    backend: Arc<dyn CompletionBackend>,
}

impl ElicitationScorer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }
}

/// Parse a backend reply as an in-range probability.
fn parse_probability(reply: &str) -> Result<f64, StrategyError> {
    let trimmed = reply.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        StrategyError::MalformedOutput(format!("not a number: {:?}", trimmed))
    })?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(StrategyError::MalformedOutput(format!(
            "probability out of range: {}",
            value
        )));
    }
    Ok(value)
}

#[async_trait]
impl Scorer for ElicitationScorer {
    fn name(&self) -> &'static str {
        "generative-elicitation"
    }

    async fn score(&self, text: &str) -> Result<f64, StrategyError> {
        let prompt = format!("{}{}", ELICITATION_INSTRUCTION, text);
        let reply = self.backend.complete(&[ChatTurn::user(prompt)]).await?;
        debug!(reply = %reply, "Elicitation reply");
        parse_probability(&reply)
    }

    async fn probe(&self) -> bool {
        self.backend.probe().await
    }
}
