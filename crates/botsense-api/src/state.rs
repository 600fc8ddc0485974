//! Application state shared across all route handlers.

use std::sync::Arc;

use botsense_chat::Orchestrator;
use botsense_classify::ScoreResolver;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Single entry point for prediction and reply requests.
    pub orchestrator: Arc<Orchestrator>,
    /// Strategy chain, exposed for explicit health re-probes.
    pub resolver: Arc<ScoreResolver>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, resolver: Arc<ScoreResolver>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            resolver,
        }
    }
}
