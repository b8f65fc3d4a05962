//! Soil Advisor Backend
//!
//! Accepts an uploaded PDF soil report, extracts soil metrics with a
//! completion API, and returns crop and weather-aware farming
//! recommendations.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use crate::config::Config;

use crate::error::AppResult;
use crate::external::{GeminiClient, WeatherClient};
use crate::services::pdf::{extract_pdf_text, TextExtractor};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini: GeminiClient,
    pub weather: WeatherClient,
    pub text_extractor: TextExtractor,
}

impl AppState {
    /// Build the clients once from configuration
    pub fn new(config: Config) -> AppResult<Self> {
        let gemini = GeminiClient::new(&config.gemini)?;
        let weather = WeatherClient::new(&config.weather);

        Ok(Self {
            config: Arc::new(config),
            gemini,
            weather,
            text_extractor: extract_pdf_text,
        })
    }

    /// Replace the PDF text extractor
    pub fn with_text_extractor(mut self, text_extractor: TextExtractor) -> Self {
        self.text_extractor = text_extractor;
        self
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_bytes = state.config.upload.max_bytes;

    Router::new()
        .route("/", get(root))
        .nest("/api", routes::api_routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Soil Advisor API v1.0"
}
