//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, a body limit and the
//! three endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState, port: u16) -> Router {
    // CORS middleware: allow localhost origins for local dashboards.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            format!("http://127.0.0.1:{}", port)
                .parse::<HeaderValue>()
                .unwrap(),
            format!("http://localhost:{}", port)
                .parse::<HeaderValue>()
                .unwrap(),
        ]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/get_message", post(handlers::get_message))
        .layer(DefaultBodyLimit::max(256 * 1024)) // message bodies are small
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
pub async fn start_server(
    config: &botsense_core::config::ServerConfig,
    state: AppState,
) -> Result<(), botsense_core::error::BotsenseError> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = create_router(state, config.port);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| botsense_core::error::BotsenseError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| botsense_core::error::BotsenseError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
