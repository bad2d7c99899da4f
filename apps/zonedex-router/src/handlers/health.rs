//! Health handler

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;
use zonedex_domain::zones::GateStatus;

use crate::AppState;

/// Service health and zone index state
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` once the index is cached, `degraded` otherwise
    #[schema(example = "ok")]
    pub status: String,
    /// `empty`, `building` or `ready`
    #[schema(example = "ready")]
    pub index: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, index) = match state.zones.status() {
        GateStatus::Ready => ("ok", "ready"),
        GateStatus::Building => ("degraded", "building"),
        GateStatus::Empty => ("degraded", "empty"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        index: index.to_string(),
    })
}
