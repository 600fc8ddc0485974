//! Volatile in-process message store.
//!
//! A single mutex guards the whole store. Coarse, but store operations are
//! O(dialog size) and memory-resident, and the one lock gives appends a
//! total order and makes every history read observe a consistent prefix.

use std::collections::HashSet;
use std::sync::Mutex;

use uuid::Uuid;

use botsense_core::types::{HistoryEntry, Message};

use crate::store::{MessageStore, StoreError, StoreStats};

/// Process-lifetime message log; cleared on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    messages: Mutex<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for MemoryStore {
    fn append(&self, message: &Message) -> Result<(), StoreError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))?;
        if messages.iter().any(|m| m.id == message.id) {
            return Err(StoreError::Duplicate(message.id.to_string()));
        }
        messages.push(message.clone());
        Ok(())
    }

    fn history(&self, dialog_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError> {
        let messages = self
            .messages
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))?;

        let mut dialog: Vec<&Message> = messages
            .iter()
            .filter(|m| m.dialog_id == dialog_id)
            .collect();
        // Stable sort: equal timestamps keep insertion order.
        dialog.sort_by_key(|m| m.created_at);

        Ok(dialog
            .into_iter()
            .map(|m| HistoryEntry {
                text: m.text.clone(),
                participant_index: m.participant_index,
            })
            .collect())
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let messages = self
            .messages
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))?;
        let unique_dialogs = messages
            .iter()
            .map(|m| m.dialog_id)
            .collect::<HashSet<_>>()
            .len() as u64;
        Ok(StoreStats {
            total_messages: messages.len() as u64,
            unique_dialogs,
        })
    }

    fn is_reachable(&self) -> bool {
        !self.messages.is_poisoned()
    }
}
