//! HTTP handlers for recommendation endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{ApiEnvelope, CropRecommendation, SoilMetrics, WeatherAdvice};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::{AnalysisService, RecommendationService};
use crate::AppState;

/// Body for `POST /api/crop-recommendations`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendationsRequest {
    pub soil_data: Option<SoilMetrics>,
}

/// Body for `POST /api/weather-recommendations`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecommendationsRequest {
    pub soil_data: Option<SoilMetrics>,
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: Option<String>,
}

/// Decode a JSON body so syntax and shape errors are reported as 400s
fn decode_body<T: DeserializeOwned>(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<T> {
    let Json(body) = body?;
    serde_json::from_value(body).map_err(|e| AppError::ValidationError(e.to_string()))
}

/// Crop recommendations for posted soil data
pub async fn crop_recommendations(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<ApiEnvelope<CropRecommendation>>> {
    let request: CropRecommendationsRequest = decode_body(body)?;
    let soil_data = request
        .soil_data
        .ok_or_else(|| AppError::missing_field("soilData"))?;

    let recommendation = RecommendationService::new(state.gemini.clone())
        .crop_recommendations(&soil_data)
        .await?;

    Ok(Json(ApiEnvelope::ok(recommendation)))
}

/// Weather data and weather-aware recommendations for posted soil data.
///
/// Unlike `/api/analyze`, a weather failure here fails the request: weather
/// is the whole point of this endpoint.
pub async fn weather_recommendations(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<ApiEnvelope<WeatherAdvice>>> {
    let request: WeatherRecommendationsRequest = decode_body(body)?;
    request.validate()?;

    let soil_data = request
        .soil_data
        .ok_or_else(|| AppError::missing_field("soilData"))?;
    let location = request
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::missing_field("location"))?;

    let advice = AnalysisService::new(&state)
        .weather_advice(&soil_data, location)
        .await?;

    Ok(Json(ApiEnvelope::ok(advice)))
}
