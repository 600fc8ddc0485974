//! Error taxonomy surfaced to the API layer.
//!
//! Every backend- or store-level failure is translated here; raw
//! transport errors never cross this boundary.

use botsense_classify::StrategyError;
use botsense_core::error::BotsenseError;
use botsense_store::StoreError;

/// Failures of orchestrated operations.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// A classification or generative backend could not be reached.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    /// A backend answered with something the pipeline could not use.
    #[error("malformed backend output: {0}")]
    MalformedBackend(String),
    /// The message store is unreachable; no coherent reply is possible.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    /// The request itself was invalid (nil ids, empty dialog id).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<StoreError> for ChatError {
    fn from(err: StoreError) -> Self {
        match err {
            // A reused message id is the caller's mistake, not an outage.
            StoreError::Duplicate(id) => {
                ChatError::InvalidInput(format!("message id already stored: {}", id))
            }
            other => ChatError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<StrategyError> for ChatError {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::Unavailable(m) => ChatError::BackendUnavailable(m),
            StrategyError::MalformedOutput(m) => ChatError::MalformedBackend(m),
        }
    }
}

impl From<ChatError> for BotsenseError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::StoreUnavailable(m) => BotsenseError::Storage(m),
            ChatError::InvalidInput(m) => BotsenseError::Api(m),
            other => BotsenseError::Generation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ChatError::StoreUnavailable("db down".to_string()).to_string(),
            "store unavailable: db down"
        );
        assert_eq!(
            ChatError::InvalidInput("nil id".to_string()).to_string(),
            "invalid input: nil id"
        );
    }

    #[test]
    fn test_from_store_error() {
        let err: ChatError = StoreError::Unavailable("refused".to_string()).into();
        assert!(matches!(err, ChatError::StoreUnavailable(_)));

        // Corrupt rows also make the store unusable for this request.
        let err: ChatError = StoreError::Data("bad uuid".to_string()).into();
        assert!(matches!(err, ChatError::StoreUnavailable(_)));

        // A duplicate id is a caller error, never a 503.
        let err: ChatError = StoreError::Duplicate("abc".to_string()).into();
        assert!(matches!(err, ChatError::InvalidInput(_)));
    }

    #[test]
    fn test_from_strategy_error() {
        let err: ChatError = StrategyError::Unavailable("timeout".to_string()).into();
        assert!(matches!(err, ChatError::BackendUnavailable(_)));

        let err: ChatError = StrategyError::MalformedOutput("not a number".to_string()).into();
        assert!(matches!(err, ChatError::MalformedBackend(_)));
    }

    #[test]
    fn test_into_botsense_error() {
        let err: BotsenseError = ChatError::StoreUnavailable("x".to_string()).into();
        assert!(matches!(err, BotsenseError::Storage(_)));

        let err: BotsenseError = ChatError::BackendUnavailable("x".to_string()).into();
        assert!(matches!(err, BotsenseError::Generation(_)));
    }
}
