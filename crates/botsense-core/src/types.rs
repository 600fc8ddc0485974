//! Shared domain and wire types.
//!
//! A `Message` is one conversational turn; a `Prediction` is the outcome
//! of a classification request. Dialogs are not materialized separately:
//! a dialog is the ordered set of messages sharing one `dialog_id`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Participant index for the human/user side of a dialog.
pub const PARTICIPANT_USER: i32 = 0;
/// Participant index for the assistant/bot side of a dialog.
pub const PARTICIPANT_ASSISTANT: i32 = 1;

// =============================================================================
// Message
// =============================================================================

/// One conversational turn, immutable once created.
///
/// Messages are created by the orchestrator when a request arrives or when
/// a backend produces a reply, and are never deleted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier, assigned at creation, never reused.
    pub id: Uuid,
    /// Identifier grouping messages into one conversation.
    pub dialog_id: Uuid,
    /// 0 = human/user, 1 = assistant/bot.
    pub participant_index: i32,
    /// UTF-8 content; may be empty but never absent.
    pub text: String,
    /// Epoch seconds; used strictly for ordering within a dialog.
    pub created_at: i64,
}

impl Message {
    /// Create a message with a fresh id and the current timestamp.
    pub fn new(dialog_id: Uuid, participant_index: i32, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            dialog_id,
            participant_index,
            text: text.into(),
            created_at: Utc::now().timestamp(),
        }
    }

    /// Create a user-authored message (participant 0).
    pub fn user(dialog_id: Uuid, text: impl Into<String>) -> Self {
        Self::new(dialog_id, PARTICIPANT_USER, text)
    }

    /// Create an assistant-authored message (participant 1).
    pub fn assistant(dialog_id: Uuid, text: impl Into<String>) -> Self {
        Self::new(dialog_id, PARTICIPANT_ASSISTANT, text)
    }

    /// Same message with an explicit id (e.g. a caller-supplied message id).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Store read view of one message: just what the reply pipeline needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub participant_index: i32,
}

// =============================================================================
// Prediction
// =============================================================================

/// Result of one classification request.
///
/// `is_bot_probability` is always present and clamped to [0.0, 1.0];
/// it is never NaN or out of range regardless of backend output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: Uuid,
    pub message_id: Uuid,
    pub dialog_id: Uuid,
    pub participant_index: i32,
    pub is_bot_probability: f64,
}

impl Prediction {
    /// Build a prediction for a message, clamping the probability.
    pub fn for_message(msg: &IncomingMessage, probability: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            message_id: msg.id,
            dialog_id: msg.dialog_id,
            participant_index: msg.participant_index,
            is_bot_probability: clamp_probability(probability),
        }
    }
}

/// Clamp a raw backend score into [0.0, 1.0]. NaN maps to 0.5 so the
/// invariant holds even if a caller skips the strategy-level checks.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        return 0.5;
    }
    p.clamp(0.0, 1.0)
}

// =============================================================================
// Wire types
// =============================================================================

/// Inbound classification request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    pub dialog_id: Uuid,
    pub participant_index: i32,
    pub text: String,
}

/// Inbound reply request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMessageRequest {
    pub dialog_id: Uuid,
    #[serde(default)]
    pub last_message_id: Option<Uuid>,
    pub last_msg_text: String,
}

/// Outbound reply response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMessageResponse {
    pub new_msg_text: String,
    pub dialog_id: Uuid,
}
