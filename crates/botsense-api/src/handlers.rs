//! Route handler functions for all API endpoints.
//!
//! Each handler extracts the JSON body via axum extractors, calls the
//! orchestrator, and shapes the response.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use botsense_core::types::{GetMessageRequest, GetMessageResponse, IncomingMessage, Prediction};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct StrategyStatus {
    pub name: &'static str,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_messages: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_dialogs: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub preferred_strategy: &'static str,
    pub strategies: Vec<StrategyStatus>,
    pub store: StoreStatus,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /predict - classify one message as bot or human.
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<IncomingMessage>,
) -> Result<Json<Prediction>, ApiError> {
    info!(message_id = %body.id, dialog_id = %body.dialog_id, "Predict request");
    let prediction = state.orchestrator.predict(&body).await?;
    Ok(Json(prediction))
}

/// POST /get_message - store the user's message and reply to it.
pub async fn get_message(
    State(state): State<AppState>,
    Json(body): Json<GetMessageRequest>,
) -> Result<Json<GetMessageResponse>, ApiError> {
    info!(
        dialog_id = %body.dialog_id,
        last_message_id = ?body.last_message_id,
        "Get-message request"
    );
    let reply = state
        .orchestrator
        .get_message(body.dialog_id, body.last_message_id, &body.last_msg_text)
        .await?;
    Ok(Json(GetMessageResponse {
        new_msg_text: reply,
        dialog_id: body.dialog_id,
    }))
}

/// GET /health - re-probe the strategy chain and report service health.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let resolver_health = state.resolver.health_check().await;
    let snapshot = state.orchestrator.health();

    let status = if snapshot.store.reachable {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        preferred_strategy: resolver_health.preferred,
        strategies: resolver_health
            .strategies
            .into_iter()
            .map(|s| StrategyStatus {
                name: s.name,
                available: s.available,
            })
            .collect(),
        store: StoreStatus {
            reachable: snapshot.store.reachable,
            total_messages: snapshot.store.stats.map(|s| s.total_messages),
            unique_dialogs: snapshot.store.stats.map(|s| s.unique_dialogs),
        },
    })
}
