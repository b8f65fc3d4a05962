//! Soil report analysis pipeline
//!
//! Runs the sequential chain for an uploaded report:
//! text -> soil metrics -> crop recommendations -> weather -> weather
//! recommendations. Everything up to the crop recommendations is required;
//! the weather stages are best-effort and degrade to `None`.

use chrono::Utc;
use shared::{
    SoilAnalysisReport, SoilMetrics, WeatherAdvice, WeatherRecommendation, WeatherSnapshot,
};

use crate::error::AppResult;
use crate::external::WeatherClient;
use crate::services::{RecommendationService, SoilExtractionService};
use crate::AppState;

/// Service composing extraction, recommendations and weather
#[derive(Clone)]
pub struct AnalysisService {
    soil: SoilExtractionService,
    recommendations: RecommendationService,
    weather: WeatherClient,
}

impl AnalysisService {
    pub fn new(state: &AppState) -> Self {
        Self {
            soil: SoilExtractionService::new(
                state.gemini.clone(),
                state.config.analysis.max_report_chars,
            ),
            recommendations: RecommendationService::new(state.gemini.clone()),
            weather: state.weather.clone(),
        }
    }

    /// Analyse extracted report text for a location
    pub async fn analyze_report(
        &self,
        report_text: &str,
        location: &str,
    ) -> AppResult<SoilAnalysisReport> {
        let soil_analysis = self.soil.extract_metrics(report_text).await?;
        let crop_recommendations = self
            .recommendations
            .crop_recommendations(&soil_analysis)
            .await?;

        let (weather_data, weather_recommendations) =
            self.best_effort_weather(&soil_analysis, location).await;

        Ok(SoilAnalysisReport {
            soil_analysis,
            crop_recommendations,
            weather_data,
            weather_recommendations,
            location: location.to_string(),
            timestamp: Utc::now(),
        })
    }

    /// Weather and weather recommendations, each degrading to `None` on failure.
    ///
    /// A failed fetch drops both; a failed recommendation call keeps the
    /// weather snapshot.
    async fn best_effort_weather(
        &self,
        soil: &SoilMetrics,
        location: &str,
    ) -> (Option<WeatherSnapshot>, Option<WeatherRecommendation>) {
        if !self.weather.is_configured() {
            tracing::info!("Weather API key not configured, skipping weather stage");
            return (None, None);
        }

        let weather = match self.weather.current_by_location(location).await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!(%location, error = %e, "Weather unavailable, continuing without it");
                return (None, None);
            }
        };

        match self
            .recommendations
            .weather_recommendations(soil, &weather, location)
            .await
        {
            Ok(recommendations) => (Some(weather), Some(recommendations)),
            Err(e) => {
                tracing::warn!(
                    %location,
                    error = %e,
                    "Weather recommendations failed, keeping weather data only"
                );
                (Some(weather), None)
            }
        }
    }

    /// Weather and weather recommendations, where any failure is returned
    pub async fn weather_advice(
        &self,
        soil: &SoilMetrics,
        location: &str,
    ) -> AppResult<WeatherAdvice> {
        let weather_data = self.weather.current_by_location(location).await?;
        let weather_recommendations = self
            .recommendations
            .weather_recommendations(soil, &weather_data, location)
            .await?;

        Ok(WeatherAdvice {
            weather_data,
            weather_recommendations,
            location: location.to_string(),
            timestamp: Utc::now(),
        })
    }
}
