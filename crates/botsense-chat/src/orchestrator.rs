//! Single entry point for prediction and reply requests.
//!
//! The orchestrator owns persistence ordering for `get_message`: the
//! user's message is stored first, unconditionally, and stays stored even
//! when later steps fail. Reply generation is best-effort; storage is
//! not.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use botsense_classify::ScoreResolver;
use botsense_core::types::{IncomingMessage, Message, Prediction};
use botsense_store::{MessageStore, StoreStats};

use crate::error::ChatError;
use crate::generator::ReplyGenerator;

/// Store section of the health surface.
#[derive(Debug, Clone)]
pub struct StoreHealth {
    pub reachable: bool,
    pub stats: Option<StoreStats>,
}

/// Aggregated health data for the service.
#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    pub preferred_strategy: &'static str,
    pub store: StoreHealth,
}

pub struct Orchestrator {
    store: Arc<dyn MessageStore>,
    resolver: Arc<ScoreResolver>,
    generator: ReplyGenerator,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn MessageStore>,
        resolver: Arc<ScoreResolver>,
        generator: ReplyGenerator,
    ) -> Self {
        Self {
            store,
            resolver,
            generator,
        }
    }

    /// Classify one message. Never fails for backend problems; the
    /// terminal heuristic guarantees an answer.
    pub async fn predict(&self, msg: &IncomingMessage) -> Result<Prediction, ChatError> {
        if msg.id.is_nil() || msg.dialog_id.is_nil() {
            return Err(ChatError::InvalidInput(
                "message id and dialog id must be non-nil".to_string(),
            ));
        }

        let probability = self.resolver.classify(&msg.text).await?;
        info!(
            message_id = %msg.id,
            dialog_id = %msg.dialog_id,
            probability = probability,
            strategy = self.resolver.preferred_name(),
            "Prediction produced"
        );
        Ok(Prediction::for_message(msg, probability))
    }

    /// Store the incoming user message, generate the next assistant turn
    /// and store it too. Returns the reply text.
    pub async fn get_message(
        &self,
        dialog_id: Uuid,
        last_message_id: Option<Uuid>,
        last_msg_text: &str,
    ) -> Result<String, ChatError> {
        if dialog_id.is_nil() {
            return Err(ChatError::InvalidInput(
                "dialog id must be non-nil".to_string(),
            ));
        }

        // User message first, unconditionally. Without persisted context
        // no coherent reply can be formed, so a failure here is the one
        // store failure the caller sees directly.
        let user_msg = match last_message_id {
            Some(id) if !id.is_nil() => Message::user(dialog_id, last_msg_text).with_id(id),
            _ => Message::user(dialog_id, last_msg_text),
        };
        self.store.append(&user_msg)?;

        let reply_text = self.generator.reply(dialog_id).await?;

        let assistant_msg = Message::assistant(dialog_id, reply_text.clone());
        if let Err(e) = self.store.append(&assistant_msg) {
            // The user message stays stored; only the assistant append
            // is reported.
            warn!(dialog_id = %dialog_id, error = %e, "Assistant message append failed");
            return Err(e.into());
        }

        info!(
            dialog_id = %dialog_id,
            user_message_id = %user_msg.id,
            assistant_message_id = %assistant_msg.id,
            "Reply produced and stored"
        );
        Ok(reply_text)
    }

    /// Health data for the service surface.
    pub fn health(&self) -> HealthSnapshot {
        let reachable = self.store.is_reachable();
        let stats = self.store.stats().ok();
        HealthSnapshot {
            preferred_strategy: self.resolver.preferred_name(),
            store: StoreHealth { reachable, stats },
        }
    }
}
