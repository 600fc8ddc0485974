//! Generative backend client for Botsense.
//!
//! Defines the provider-agnostic `CompletionBackend` capability plus an
//! HTTP implementation speaking the OpenAI-compatible chat completions
//! protocol. Both the elicitation classifier and the reply generator talk
//! to the backend through this crate.

pub mod error;
pub mod http;
pub mod types;

pub use error::LlmError;
pub use http::HttpCompletionBackend;
pub use types::{ChatRole, ChatTurn, CompletionBackend};
