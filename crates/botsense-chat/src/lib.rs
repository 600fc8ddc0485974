//! Reply generation and request orchestration for Botsense.
//!
//! `ReplyGenerator` turns persisted dialog history into the next
//! assistant turn; `Orchestrator` is the single entry point the API layer
//! calls for predictions, replies and health data.

pub mod error;
pub mod generator;
pub mod orchestrator;

pub use error::ChatError;
pub use generator::{ReplyGenerator, GENERATION_FAILURE_REPLY, NO_HISTORY_REPLY};
pub use orchestrator::{HealthSnapshot, Orchestrator, StoreHealth};
