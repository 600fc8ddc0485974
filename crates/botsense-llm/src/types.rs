//! Provider-agnostic chat turn types and the backend capability trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Role of one chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One role-tagged turn sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A backend capable of completing a chat-style turn sequence.
///
/// Implementations normalize whatever their wire protocol returns into
/// plain reply text, so callers never see provider-specific shapes.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name, used in logs and the health surface.
    fn name(&self) -> &str;

    /// Complete the turn sequence, returning the reply text verbatim.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, LlmError>;

    /// Cheap reachability check; never an error, just yes or no.
    async fn probe(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(ChatRole::System.as_str(), "system");
        assert_eq!(ChatRole::User.as_str(), "user");
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_turn_constructors() {
        let turn = ChatTurn::user("hi");
        assert_eq!(turn.role, ChatRole::User);
        assert_eq!(turn.content, "hi");

        let turn = ChatTurn::assistant("hello");
        assert_eq!(turn.role, ChatRole::Assistant);
    }

    #[test]
    fn test_turn_wire_shape() {
        let turn = ChatTurn::user("are you a bot?");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "are you a bot?");
    }
}
