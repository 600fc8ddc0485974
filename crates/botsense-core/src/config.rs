use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BotsenseError, Result};

/// Top-level configuration for the Botsense service.
///
/// Loaded from `botsense.toml` by default. Each section corresponds to one
/// component of the pipeline or a cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotsenseConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl BotsenseConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BotsenseConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BotsenseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            log_level: "info".to_string(),
        }
    }
}

/// Message store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend: "memory" (volatile) or "sqlite" (durable).
    pub backend: String,
    /// Database file path for the sqlite backend.
    pub sqlite_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            sqlite_path: "botsense.db".to_string(),
        }
    }
}

/// Classification strategy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Path to a local model weight artifact (JSON). Empty disables the
    /// local strategy.
    pub artifact_path: String,
    /// Consecutive preferred-strategy failures before demotion.
    pub demotion_threshold: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            artifact_path: String::new(),
            demotion_threshold: 3,
        }
    }
}

/// Model registry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry base URL.
    pub url: String,
    /// Registered model name.
    pub model_name: String,
    /// Promotion label designating the serving version.
    pub promoted_label: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: "http://mlflow:5000".to_string(),
            model_name: "bot_classifier".to_string(),
            promoted_label: "Champion".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Generative backend settings (shared by elicitation and reply paths).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend base URL (OpenAI-compatible chat completions).
    pub url: String,
    /// Model name passed through to the backend.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: "http://llm:11434".to_string(),
            model: "llama.cpp".to_string(),
            timeout_secs: 30,
        }
    }
}
