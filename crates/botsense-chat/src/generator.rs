//! Next-turn reply generation from persisted dialog history.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use botsense_core::types::PARTICIPANT_ASSISTANT;
use botsense_llm::{ChatTurn, CompletionBackend};
use botsense_store::MessageStore;

use crate::error::ChatError;

/// Reply for a dialog with no stored history. Returned without touching
/// any backend.
pub const NO_HISTORY_REPLY: &str =
    "There is no conversation history for this dialog yet. Send a message to get started.";

/// Reply when the generative backend fails. The reply channel always
/// yields displayable text, so failures degrade to this instead of an
/// error.
pub const GENERATION_FAILURE_REPLY: &str =
    "I could not come up with a reply just now. Please try again in a moment.";

/// Produces the next assistant turn for a dialog.
///
/// Read-only by construction: it never writes to the store, so the
/// orchestrator stays the single owner of persistence.
pub struct ReplyGenerator {
    store: Arc<dyn MessageStore>,
    backend: Arc<dyn CompletionBackend>,
}

impl ReplyGenerator {
    pub fn new(store: Arc<dyn MessageStore>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { store, backend }
    }

    /// Generate a reply from the dialog's stored history.
    ///
    /// Store read failures propagate; backend failures degrade to
    /// [`GENERATION_FAILURE_REPLY`].
    pub async fn reply(&self, dialog_id: Uuid) -> Result<String, ChatError> {
        let history = self.store.history(dialog_id)?;
        if history.is_empty() {
            debug!(dialog_id = %dialog_id, "No history, returning sentinel reply");
            return Ok(NO_HISTORY_REPLY.to_string());
        }

        let turns: Vec<ChatTurn> = history
            .iter()
            .map(|entry| {
                if entry.participant_index == PARTICIPANT_ASSISTANT {
                    ChatTurn::assistant(entry.text.clone())
                } else {
                    ChatTurn::user(entry.text.clone())
                }
            })
            .collect();

        match self.backend.complete(&turns).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    dialog_id = %dialog_id,
                    backend = self.backend.name(),
                    error = %e,
                    "Reply generation failed, degrading to sentinel"
                );
                Ok(GENERATION_FAILURE_REPLY.to_string())
            }
        }
    }
}
