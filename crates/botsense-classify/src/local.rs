//! Local trained model strategy.
//!
//! Loads a weight artifact (bias plus per-token weights, JSON) once at
//! startup and scores texts with a logistic model over lowercased tokens.
//! If no artifact is present the strategy simply never enters the chain.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StrategyError;
use crate::scorer::Scorer;

/// Serialized model weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub bias: f64,
    pub weights: HashMap<String, f64>,
}

/// Strategy backed by a locally loaded weight artifact.
pub struct LocalModelScorer {
    artifact: ModelArtifact,
}

impl LocalModelScorer {
    /// Load the artifact from disk. Fails (and the strategy stays out of
    /// the chain) if the file is missing or does not parse.
    pub fn load(path: &Path) -> Result<Self, StrategyError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StrategyError::Unavailable(format!("model artifact unreadable: {}", e))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&content).map_err(|e| {
            StrategyError::MalformedOutput(format!("model artifact invalid: {}", e))
        })?;
        info!(
            path = %path.display(),
            tokens = artifact.weights.len(),
            "Local model artifact loaded"
        );
        Ok(Self { artifact })
    }

    /// Build directly from an in-memory artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    fn raw_score(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let z: f64 = self.artifact.bias
            + lower
                .split(|c: char| !c.is_alphanumeric())
                .filter(|t| !t.is_empty())
                .filter_map(|t| self.artifact.weights.get(t))
                .sum::<f64>();
        sigmoid(z)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[async_trait]
impl Scorer for LocalModelScorer {
    fn name(&self) -> &'static str {
        "local-model"
    }

    async fn score(&self, text: &str) -> Result<f64, StrategyError> {
        Ok(self.raw_score(text))
    }

    async fn probe(&self) -> bool {
        // The artifact was loaded at construction; nothing can go away.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spam_artifact() -> ModelArtifact {
        let mut weights = HashMap::new();
        weights.insert("free".to_string(), 2.0);
        weights.insert("offer".to_string(), 1.5);
        weights.insert("thanks".to_string(), -2.0);
        ModelArtifact { bias: 0.0, weights }
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(sigmoid(50.0) > 0.99);
        assert!(sigmoid(-50.0) < 0.01);
    }

    #[tokio::test]
    async fn test_spammy_text_scores_high() {
        let scorer = LocalModelScorer::from_artifact(spam_artifact());
        let p = scorer.score("free offer inside").await.unwrap();
        assert!(p > 0.9);
    }

    #[tokio::test]
    async fn test_polite_text_scores_low() {
        let scorer = LocalModelScorer::from_artifact(spam_artifact());
        let p = scorer.score("thanks for the update").await.unwrap();
        assert!(p < 0.2);
    }

    #[tokio::test]
    async fn test_unknown_tokens_yield_base_rate() {
        let scorer = LocalModelScorer::from_artifact(spam_artifact());
        let p = scorer.score("completely unrelated words").await.unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_tokenization_is_case_insensitive() {
        let scorer = LocalModelScorer::from_artifact(spam_artifact());
        let upper = scorer.score("FREE OFFER").await.unwrap();
        let lower = scorer.score("free offer").await.unwrap();
        assert_eq!(upper, lower);
    }

    #[tokio::test]
    async fn test_punctuation_splits_tokens() {
        let scorer = LocalModelScorer::from_artifact(spam_artifact());
        let p1 = scorer.score("free,offer!").await.unwrap();
        let p2 = scorer.score("free offer").await.unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = LocalModelScorer::load(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(StrategyError::Unavailable(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = LocalModelScorer::load(&path);
        assert!(matches!(result, Err(StrategyError::MalformedOutput(_))));
    }

    #[tokio::test]
    async fn test_load_valid_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let json = serde_json::to_string(&spam_artifact()).unwrap();
        std::fs::write(&path, json).unwrap();

        let scorer = LocalModelScorer::load(&path).unwrap();
        assert!(scorer.probe().await);
        assert_eq!(scorer.name(), "local-model");
        let p = scorer.score("free offer").await.unwrap();
        assert!(p > 0.9);
    }

    #[tokio::test]
    async fn test_output_always_in_range() {
        let mut weights = HashMap::new();
        weights.insert("x".to_string(), 1e6);
        let scorer = LocalModelScorer::from_artifact(ModelArtifact { bias: -1e6, weights });
        let p = scorer.score("x x x x").await.unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
}
