//! Error taxonomy for generative backend calls.

use botsense_core::error::BotsenseError;

/// Errors from a completion backend.
///
/// `Malformed` is kept distinct from the transport variants because the
/// classification resolver treats "answered but unusable" and "did not
/// answer" identically for fallthrough, while callers may still want to
/// log them differently.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend timed out: {0}")]
    Timeout(String),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl LlmError {
    /// True when the backend answered but the payload was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, LlmError::Malformed(_))
    }
}

impl From<LlmError> for BotsenseError {
    fn from(err: LlmError) -> Self {
        BotsenseError::Generation(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(err.to_string())
        } else if err.is_decode() {
            LlmError::Malformed(err.to_string())
        } else {
            LlmError::Unreachable(err.to_string())
        }
    }
}
