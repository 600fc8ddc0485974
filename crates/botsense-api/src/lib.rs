//! HTTP surface for Botsense.
//!
//! Thin axum layer over the orchestrator: request extraction, status
//! mapping and JSON shaping live here; all behavior lives below.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use routes::{create_router, start_server};
pub use state::AppState;
