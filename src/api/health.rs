//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::api::types::Json;

use super::state::AppState;

const STORE_UNAVAILABLE: &str = "store unavailable";

/// Health response with component status
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Returns 200 whenever the process is serving requests
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: the team store must answer a count query
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Team store reachable", body = HealthResponse),
        (status = 503, description = "Team store unavailable", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let store_check = check_team_store(&state).await;
    let status = store_check.status;

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![store_check]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/live",
    responses((status = 200, description = "Process is alive")),
    tag = "Health"
)]
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_team_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();

    let (status, message) = match state.team_service.count().await {
        Ok(count) => (HealthStatus::Healthy, Some(format!("{} teams", count))),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (HealthStatus::Unhealthy, Some(STORE_UNAVAILABLE.to_string()))
        }
    };

    HealthCheck {
        name: "team_store".to_string(),
        status,
        message,
        latency_ms: Some(start.elapsed().as_millis() as u64),
    }
}
