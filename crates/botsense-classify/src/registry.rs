//! Registry-hosted model strategy.
//!
//! Resolves a registered model at a promotion label (e.g. `bot_classifier`
//! at `Champion`) and scores texts against whatever version the registry
//! currently designates. The label is stable; version promotion happens
//! entirely inside the registry.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StrategyError;
use crate::scorer::Scorer;

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    probability: f64,
}

/// Strategy backed by a remote model registry's promoted model slot.
pub struct RegistryScorer {
    client: reqwest::Client,
    base_url: String,
    model_name: String,
    promoted_label: String,
}

impl RegistryScorer {
    pub fn new(
        base_url: impl Into<String>,
        model_name: impl Into<String>,
        promoted_label: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_name: model_name.into(),
            promoted_label: promoted_label.into(),
        }
    }

    /// URL of the promoted model slot.
    fn slot_url(&self) -> String {
        format!(
            "{}/api/models/{}/labels/{}",
            self.base_url, self.model_name, self.promoted_label
        )
    }
}

#[async_trait]
impl Scorer for RegistryScorer {
    fn name(&self) -> &'static str {
        "registry-model"
    }

    async fn score(&self, text: &str) -> Result<f64, StrategyError> {
        let url = format!("{}/score", self.slot_url());
        debug!(url = %url, "Scoring via registry");

        let response = self
            .client
            .post(&url)
            .json(&ScoreRequest { text })
            .send()
            .await
            .map_err(|e| StrategyError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrategyError::Unavailable(format!(
                "registry returned status {}",
                status.as_u16()
            )));
        }

        let body: ScoreResponse = response
            .json()
            .await
            .map_err(|e| StrategyError::MalformedOutput(e.to_string()))?;

        if body.probability.is_nan() {
            return Err(StrategyError::MalformedOutput(
                "registry returned NaN probability".to_string(),
            ));
        }
        Ok(body.probability)
    }

    /// Available only when the registry is reachable and a model version is
    /// promoted at the configured label.
    async fn probe(&self) -> bool {
        match self.client.get(self.slot_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Registry probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RegistryScorer {
        RegistryScorer::new(
            "http://mlflow:5000/",
            "bot_classifier",
            "Champion",
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_slot_url() {
        assert_eq!(
            scorer().slot_url(),
            "http://mlflow:5000/api/models/bot_classifier/labels/Champion"
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(scorer().name(), "registry-model");
    }

    #[test]
    fn test_score_response_parsing() {
        let body = r#"{"probability": 0.73}"#;
        let parsed: ScoreResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.probability, 0.73);
    }

    #[test]
    fn test_score_response_rejects_non_numeric() {
        let body = r#"{"probability": "high"}"#;
        let parsed: Result<ScoreResponse, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_score_request_wire_shape() {
        let json = serde_json::to_value(ScoreRequest { text: "hi there" }).unwrap();
        assert_eq!(json["text"], "hi there");
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_unavailable() {
        let scorer = RegistryScorer::new(
            "http://127.0.0.1:9",
            "bot_classifier",
            "Champion",
            Duration::from_millis(200),
        );
        let result = scorer.score("text").await;
        assert!(matches!(result, Err(StrategyError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_unreachable_registry_probe_false() {
        let scorer = RegistryScorer::new(
            "http://127.0.0.1:9",
            "bot_classifier",
            "Champion",
            Duration::from_millis(200),
        );
        assert!(!scorer.probe().await);
    }
}
