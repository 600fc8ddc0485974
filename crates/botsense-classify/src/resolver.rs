//! Chain-of-responsibility resolver over scoring strategies.
//!
//! Strategies are held in priority order. Every request starts at the
//! currently preferred strategy and falls through to the next on failure;
//! the terminal heuristic never fails, so `classify` always produces a
//! score. Repeated failures of the preferred strategy demote it so later
//! requests skip a backend that is known to be down, and an explicit
//! health check re-probes the whole chain and re-promotes.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use botsense_core::types::clamp_probability;

use crate::error::StrategyError;
use crate::scorer::Scorer;

/// Demotions happen after this many consecutive preferred-strategy
/// failures unless configured otherwise.
pub const DEFAULT_DEMOTION_THRESHOLD: u32 = 3;

struct ResolverState {
    /// Index into `strategies` the next request starts from.
    preferred: usize,
    /// Consecutive failures of the preferred strategy.
    consecutive_failures: u32,
}

/// Availability of one strategy, as seen by the last probe.
#[derive(Debug, Clone)]
pub struct StrategyHealth {
    pub name: &'static str,
    pub available: bool,
}

/// Outcome of a full-chain health check.
#[derive(Debug, Clone)]
pub struct ResolverHealth {
    pub preferred: &'static str,
    pub strategies: Vec<StrategyHealth>,
}

/// Resolves a text to a bot probability via ordered strategy fallthrough.
pub struct ScoreResolver {
    strategies: Vec<Arc<dyn Scorer>>,
    state: Mutex<ResolverState>,
    demotion_threshold: u32,
}

impl ScoreResolver {
    /// Build a resolver over strategies in priority order. The final
    /// strategy must be infallible; callers put the heuristic there.
    pub fn new(strategies: Vec<Arc<dyn Scorer>>, demotion_threshold: u32) -> Self {
        debug_assert!(!strategies.is_empty());
        Self {
            strategies,
            state: Mutex::new(ResolverState {
                preferred: 0,
                consecutive_failures: 0,
            }),
            demotion_threshold: demotion_threshold.max(1),
        }
    }

    /// Probe strategies in priority order and prefer the first available
    /// one. With nothing reachable the terminal strategy is preferred.
    pub async fn probe_startup(&self) {
        let mut preferred = self.strategies.len() - 1;
        for (idx, strategy) in self.strategies.iter().enumerate() {
            if strategy.probe().await {
                preferred = idx;
                break;
            }
            debug!(strategy = strategy.name(), "Strategy unavailable at startup");
        }
        info!(
            strategy = self.strategies[preferred].name(),
            "Preferred scoring strategy selected"
        );
        let mut state = self.lock_state();
        state.preferred = preferred;
        state.consecutive_failures = 0;
    }

    /// Name of the strategy the next request will start from.
    pub fn preferred_name(&self) -> &'static str {
        let state = self.lock_state();
        self.strategies[state.preferred].name()
    }

    /// Score a text, falling through the chain from the preferred
    /// strategy. The returned probability is always in [0, 1].
    pub async fn classify(&self, text: &str) -> Result<f64, StrategyError> {
        let preferred = self.lock_state().preferred;
        let mut last_error: Option<StrategyError> = None;

        for idx in preferred..self.strategies.len() {
            let strategy = &self.strategies[idx];
            match strategy.score(text).await {
                Ok(p) if p.is_finite() => {
                    self.record_outcome(preferred, idx);
                    return Ok(clamp_probability(p));
                }
                Ok(p) => {
                    warn!(
                        strategy = strategy.name(),
                        value = p,
                        "Strategy returned non-finite score, falling through"
                    );
                    last_error = Some(StrategyError::MalformedOutput(format!(
                        "non-finite score {}",
                        p
                    )));
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "Strategy failed, falling through"
                    );
                    last_error = Some(e);
                }
            }
        }

        // Only reachable when the terminal strategy itself fails.
        self.record_outcome(preferred, self.strategies.len());
        Err(last_error.unwrap_or_else(|| {
            StrategyError::Unavailable("no scoring strategies configured".to_string())
        }))
    }

    /// Re-probe the whole chain and re-promote to the best available
    /// strategy, recovering from earlier demotions.
    pub async fn health_check(&self) -> ResolverHealth {
        let mut report = Vec::with_capacity(self.strategies.len());
        let mut best: Option<usize> = None;
        for (idx, strategy) in self.strategies.iter().enumerate() {
            let available = strategy.probe().await;
            if available && best.is_none() {
                best = Some(idx);
            }
            report.push(StrategyHealth {
                name: strategy.name(),
                available,
            });
        }

        let preferred = best.unwrap_or(self.strategies.len() - 1);
        {
            let mut state = self.lock_state();
            if state.preferred != preferred {
                info!(
                    from = self.strategies[state.preferred].name(),
                    to = self.strategies[preferred].name(),
                    "Preferred strategy changed by health check"
                );
            }
            state.preferred = preferred;
            state.consecutive_failures = 0;
        }

        ResolverHealth {
            preferred: self.strategies[preferred].name(),
            strategies: report,
        }
    }

    /// Update the failure counter after a request that started at
    /// `preferred` and was served by `served` (or by nothing, when
    /// `served` is past the end).
    fn record_outcome(&self, preferred: usize, served: usize) {
        let mut state = self.lock_state();
        // A concurrent demotion or health check moved the goalposts;
        // the counter no longer describes this strategy.
        if state.preferred != preferred {
            return;
        }
        if served == preferred {
            state.consecutive_failures = 0;
            return;
        }
        state.consecutive_failures += 1;
        if state.consecutive_failures >= self.demotion_threshold
            && state.preferred + 1 < self.strategies.len()
        {
            let from = self.strategies[state.preferred].name();
            state.preferred += 1;
            state.consecutive_failures = 0;
            warn!(
                from = from,
                to = self.strategies[state.preferred].name(),
                "Demoting preferred scoring strategy"
            );
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ResolverState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
