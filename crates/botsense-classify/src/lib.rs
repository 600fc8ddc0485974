//! Classification resolver for Botsense.
//!
//! Produces a bot probability for a text by trying strategies in a fixed
//! priority order (local model, registry-hosted model, generative
//! elicitation, heuristic) until one succeeds. The heuristic terminal
//! strategy never fails, so a classification request never errors for
//! backend problems.

pub mod elicit;
pub mod error;
pub mod heuristic;
pub mod local;
pub mod registry;
pub mod resolver;
pub mod scorer;

pub use elicit::ElicitationScorer;
pub use error::StrategyError;
pub use heuristic::{heuristic_score, HeuristicScorer};
pub use local::{LocalModelScorer, ModelArtifact};
pub use registry::RegistryScorer;
pub use resolver::ScoreResolver;
pub use scorer::Scorer;
