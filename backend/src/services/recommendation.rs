//! Crop and weather recommendations through the completion API

use shared::{
    CropRecommendation, SoilHealth, SoilMetrics, WeatherRecommendation, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};
use crate::external::GeminiClient;

/// Service generating recommendations from soil (and weather) data
#[derive(Clone)]
pub struct RecommendationService {
    gemini: GeminiClient,
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode prompt data: {}", e)))
}

/// Build the crop recommendation instruction
pub fn build_crop_prompt(soil: &SoilMetrics) -> AppResult<String> {
    let soil_json = to_pretty_json(soil)?;
    let health = SoilHealth::ALL
        .iter()
        .map(|h| format!("\"{}\"", h))
        .collect::<Vec<_>>()
        .join(" | ");

    Ok(format!(
        "You are an agronomist advising a farmer.\n\
         Based on the soil metrics below, recommend suitable crops and a farming plan.\n\
         Respond with a single JSON object and nothing else, using this shape:\n\
         {{\"soilHealth\": {health}, \
         \"recommendedCrops\": [string], \
         \"pathogenAlert\": {{\"detected\": boolean, \"message\": string}}, \
         \"soilImprovements\": [string], \
         \"farmingPlan\": object, \
         \"nutrientRecommendations\": [string], \
         \"riskFactors\": [string]}}\n\
         Set pathogenAlert.detected to true when the pathogen count is elevated.\n\
         Null values mean the metric was not reported.\n\n\
         Soil metrics:\n{soil_json}"
    ))
}

/// Build the weather-aware recommendation instruction
pub fn build_weather_prompt(
    soil: &SoilMetrics,
    weather: &WeatherSnapshot,
    location: &str,
) -> AppResult<String> {
    let soil_json = to_pretty_json(soil)?;
    let weather_json = to_pretty_json(weather)?;

    Ok(format!(
        "You are an agronomist advising a farmer in {location}.\n\
         Combine the soil metrics and the current weather below into practical advice.\n\
         Respond with a single JSON object and nothing else, using this shape:\n\
         {{\"weatherSuitability\": string, \
         \"seasonalRecommendations\": [string], \
         \"weatherAlerts\": [string], \
         \"irrigationAdvice\": string, \
         \"farmingActivities\": [string]}}\n\n\
         Soil metrics:\n{soil_json}\n\n\
         Current weather (temperature in °C, humidity in %, wind speed in m/s, pressure in hPa):\n\
         {weather_json}"
    ))
}

impl RecommendationService {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// Crop recommendations for a set of soil metrics
    pub async fn crop_recommendations(&self, soil: &SoilMetrics) -> AppResult<CropRecommendation> {
        let prompt = build_crop_prompt(soil)?;
        let recommendation: CropRecommendation = self.gemini.generate_json(&prompt).await?;

        tracing::info!(
            soil_health = ?recommendation.soil_health(),
            crops = recommendation.recommended_crop_count(),
            pathogen_alert = recommendation.pathogen_detected(),
            "Crop recommendations generated"
        );
        Ok(recommendation)
    }

    /// Recommendations combining soil metrics with current weather
    pub async fn weather_recommendations(
        &self,
        soil: &SoilMetrics,
        weather: &WeatherSnapshot,
        location: &str,
    ) -> AppResult<WeatherRecommendation> {
        let prompt = build_weather_prompt(soil, weather, location)?;
        let recommendation: WeatherRecommendation = self.gemini.generate_json(&prompt).await?;

        tracing::info!(
            %location,
            alerts = recommendation.weather_alert_count(),
            "Weather recommendations generated"
        );
        Ok(recommendation)
    }
}
