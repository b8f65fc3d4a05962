//! Health check handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub services: ServiceStatus,
}

/// Which external services are configured
#[derive(Serialize)]
pub struct ServiceStatus {
    pub gemini: bool,
    pub weather: bool,
}

/// Health check endpoint handler. Reports configuration only, never calls out.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceStatus {
            gemini: !state.config.gemini.api_key.is_empty(),
            weather: state.weather.is_configured(),
        },
    })
}
