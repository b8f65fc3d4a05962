//! Route definitions for the Soil Advisor API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes, mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Full pipeline for an uploaded PDF
        .route("/analyze", post(handlers::analyze_soil_report))
        // Recommendations for already-structured soil data
        .route("/crop-recommendations", post(handlers::crop_recommendations))
        .route(
            "/weather-recommendations",
            post(handlers::weather_recommendations),
        )
}
