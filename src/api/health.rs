//! Health and readiness endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use super::types::Json;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: HealthStatus,
    pub checks: Vec<ReadyCheck>,
}

#[derive(Serialize)]
pub struct ReadyCheck {
    pub name: &'static str,
    pub status: HealthStatus,
}

/// Liveness probe: 200 whenever the process is up
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe: verifies the key store answers
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_status = match state.api_keys.list().await {
        Ok(_) => HealthStatus::Healthy,
        Err(_) => HealthStatus::Degraded,
    };

    let response = ReadyResponse {
        status: store_status,
        checks: vec![ReadyCheck {
            name: "key_store",
            status: store_status,
        }],
    };

    let code = match store_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(response))
}
