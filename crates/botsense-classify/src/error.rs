//! Strategy failure taxonomy.
//!
//! Every strategy returns a uniform `Result<f64, StrategyError>`; the
//! resolver's fallthrough loop is the only place that interprets failure.

use botsense_core::error::BotsenseError;
use botsense_llm::LlmError;

/// Why one classification strategy could not produce a score.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The backing model or service could not be reached or timed out.
    #[error("strategy unavailable: {0}")]
    Unavailable(String),
    /// The backend answered but its output was not an in-range probability.
    #[error("malformed strategy output: {0}")]
    MalformedOutput(String),
}

impl From<LlmError> for StrategyError {
    fn from(err: LlmError) -> Self {
        if err.is_malformed() {
            StrategyError::MalformedOutput(err.to_string())
        } else {
            StrategyError::Unavailable(err.to_string())
        }
    }
}

impl From<StrategyError> for BotsenseError {
    fn from(err: StrategyError) -> Self {
        BotsenseError::Classification(err.to_string())
    }
}
