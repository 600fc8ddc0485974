//! The scoring capability every strategy implements.

use async_trait::async_trait;

use crate::error::StrategyError;

/// One candidate backend capable of producing a bot-probability score.
///
/// Strategies are polymorphic over exactly this capability; whatever shape
/// their backend's response takes, they normalize it to a single f64
/// before returning. Values are not clamped here; the resolver owns the
/// final clamp.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Strategy name, used in logs and the health surface.
    fn name(&self) -> &'static str;

    /// Probability in [0, 1] that the text was authored by a bot, or why
    /// this strategy cannot say.
    async fn score(&self, text: &str) -> Result<f64, StrategyError>;

    /// Whether the strategy can currently serve requests. Used once at
    /// startup and on explicit health checks, never per request.
    async fn probe(&self) -> bool;
}
