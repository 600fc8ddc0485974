//! HTTP completion backend speaking the OpenAI-compatible protocol.
//!
//! Targets any `/v1/chat/completions` endpoint (llama.cpp server, Ollama,
//! vLLM). The reqwest client is created once with a hard timeout; a timed
//! out or unreachable call surfaces as an `LlmError` and never hangs the
//! caller.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;
use crate::types::{ChatTurn, CompletionBackend};

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// =============================================================================
// HttpCompletionBackend
// =============================================================================

/// OpenAI-compatible chat completion client.
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl HttpCompletionBackend {
    /// Create a client for the given base URL and model.
    ///
    /// The timeout bounds every request; connection pooling is handled by
    /// the shared reqwest client.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    fn name(&self) -> &str {
        "http-chat-completions"
    }

    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: turns,
        };

        debug!(url = %self.completions_url(), turns = turns.len(), "Sending completion request");

        let response = self
            .client
            .post(self.completions_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))?;

        body.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| LlmError::Malformed("response has no choices".to_string()))
    }

    async fn probe(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Completion backend probe failed");
                false
            }
        }
    }
}
