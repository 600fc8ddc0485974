//! Botsense application binary - composition root.
//!
//! Ties together all Botsense crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Open the message store (in-memory or SQLite)
//! 3. Build the strategy chain and probe it once
//! 4. Start the axum REST API server

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use botsense_core::config::BotsenseConfig;

use botsense_api::routes;
use botsense_api::state::AppState;
use botsense_chat::{Orchestrator, ReplyGenerator};
use botsense_classify::{
    ElicitationScorer, HeuristicScorer, LocalModelScorer, RegistryScorer, ScoreResolver, Scorer,
};
use botsense_llm::{CompletionBackend, HttpCompletionBackend};
use botsense_store::{Database, MemoryStore, MessageStore, SqliteStore};

/// Resolve the config file path (BOTSENSE_CONFIG env, or ./botsense.toml).
fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("BOTSENSE_CONFIG") {
        return PathBuf::from(p);
    }
    PathBuf::from("botsense.toml")
}

/// Open the configured store backend.
fn open_store(config: &BotsenseConfig) -> Result<Arc<dyn MessageStore>, Box<dyn std::error::Error>> {
    match config.store.backend.as_str() {
        "sqlite" => {
            let db = Database::new(std::path::Path::new(&config.store.sqlite_path))?;
            tracing::info!(path = %config.store.sqlite_path, "SQLite message store opened");
            Ok(Arc::new(SqliteStore::new(Arc::new(db))))
        }
        "memory" => {
            tracing::info!("In-memory message store selected (volatile)");
            Ok(Arc::new(MemoryStore::new()))
        }
        other => Err(format!("unknown store backend: {}", other).into()),
    }
}

/// Build the strategy chain in priority order.
fn build_strategies(
    config: &BotsenseConfig,
    backend: Arc<dyn CompletionBackend>,
) -> Vec<Arc<dyn Scorer>> {
    let mut strategies: Vec<Arc<dyn Scorer>> = Vec::new();

    if !config.classifier.artifact_path.is_empty() {
        match LocalModelScorer::load(std::path::Path::new(&config.classifier.artifact_path)) {
            Ok(scorer) => strategies.push(Arc::new(scorer)),
            Err(e) => {
                tracing::warn!(error = %e, "Local model unavailable, strategy skipped");
            }
        }
    }

    strategies.push(Arc::new(RegistryScorer::new(
        config.registry.url.clone(),
        config.registry.model_name.clone(),
        config.registry.promoted_label.clone(),
        Duration::from_secs(config.registry.timeout_secs),
    )));
    strategies.push(Arc::new(ElicitationScorer::new(backend)));
    strategies.push(Arc::new(HeuristicScorer::new()));

    strategies
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Botsense v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = config_path();
    let config = BotsenseConfig::load_or_default(&config_file);
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Store.
    let store = open_store(&config)?;

    // Generative backend, shared by elicitation and reply generation.
    let backend: Arc<dyn CompletionBackend> = Arc::new(HttpCompletionBackend::new(
        config.llm.url.clone(),
        config.llm.model.clone(),
        Duration::from_secs(config.llm.timeout_secs),
    ));

    // Strategy chain.
    let strategies = build_strategies(&config, Arc::clone(&backend));
    let resolver = Arc::new(ScoreResolver::new(
        strategies,
        config.classifier.demotion_threshold,
    ));
    resolver.probe_startup().await;
    tracing::info!(
        strategy = resolver.preferred_name(),
        "Strategy chain ready"
    );

    // Orchestrator and API state.
    let generator = ReplyGenerator::new(Arc::clone(&store), backend);
    let orchestrator = Orchestrator::new(store, Arc::clone(&resolver), generator);
    let state = AppState::new(orchestrator, resolver);

    // API server (blocks until shutdown).
    routes::start_server(&config.server, state).await?;

    Ok(())
}
