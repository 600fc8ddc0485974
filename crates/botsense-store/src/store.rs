//! The message store contract shared by all backends.

use serde::Serialize;
use uuid::Uuid;

use botsense_core::error::BotsenseError;
use botsense_core::types::{HistoryEntry, Message};

/// Errors from a message store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing medium could not be reached or is in an unusable state.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A message with this id is already stored. Message ids are never
    /// reused, so this is a caller problem, not a store outage.
    #[error("duplicate message id: {0}")]
    Duplicate(String),
    /// A stored row could not be decoded.
    #[error("corrupt store data: {0}")]
    Data(String),
}

impl From<StoreError> for BotsenseError {
    fn from(err: StoreError) -> Self {
        BotsenseError::Storage(err.to_string())
    }
}

/// Aggregate store statistics, surfaced on the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_messages: u64,
    pub unique_dialogs: u64,
}

/// Ordered, per-dialog message log.
///
/// Implementations must serialize appends within a dialog and return
/// history in chronological order (`created_at`, ties broken by insertion
/// order). An unknown `dialog_id` yields an empty sequence, not an error.
/// No retries happen here; retry policy belongs to the orchestrator.
pub trait MessageStore: Send + Sync {
    /// Persist one message. An already-stored id is `Duplicate` in every
    /// backend.
    fn append(&self, message: &Message) -> Result<(), StoreError>;

    /// All messages for the dialog, oldest first.
    fn history(&self, dialog_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError>;

    /// Total message and distinct dialog counts.
    fn stats(&self) -> Result<StoreStats, StoreError>;

    /// Whether the backing medium currently answers.
    fn is_reachable(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Unavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "store unavailable: connection refused");

        let err = StoreError::Data("bad uuid".to_string());
        assert_eq!(err.to_string(), "corrupt store data: bad uuid");

        let err = StoreError::Duplicate("abc".to_string());
        assert_eq!(err.to_string(), "duplicate message id: abc");
    }

    #[test]
    fn test_store_error_into_botsense_error() {
        let err: BotsenseError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(err, BotsenseError::Storage(_)));
        assert!(err.to_string().contains("down"));
    }

    #[test]
    fn test_store_stats_serializes() {
        let stats = StoreStats {
            total_messages: 4,
            unique_dialogs: 2,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_messages"], 4);
        assert_eq!(json["unique_dialogs"], 2);
    }
}
