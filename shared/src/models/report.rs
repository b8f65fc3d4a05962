//! Aggregate response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CropRecommendation, SoilMetrics, WeatherRecommendation, WeatherSnapshot};

/// Full result of analysing an uploaded soil report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisReport {
    pub soil_analysis: SoilMetrics,
    pub crop_recommendations: CropRecommendation,
    /// `None` when weather was unavailable for the location
    pub weather_data: Option<WeatherSnapshot>,
    pub weather_recommendations: Option<WeatherRecommendation>,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

/// Weather conditions and recommendations for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAdvice {
    pub weather_data: WeatherSnapshot,
    pub weather_recommendations: WeatherRecommendation,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}
