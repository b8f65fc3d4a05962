//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint, queried by a
//! free-text location such as "Pune, India".

use reqwest::Client;
use serde::Deserialize;
use shared::WeatherSnapshot;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current weather conditions for a location name
    pub async fn current_by_location(&self, location: &str) -> AppResult<WeatherSnapshot> {
        let api_key = self.api_key.as_deref().ok_or(AppError::WeatherNotConfigured)?;

        let url = format!("{}/weather", self.base_url);
        tracing::debug!(%location, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::WeatherService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::WeatherService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: data.main.temp,
        humidity: data.main.humidity,
        description: data
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default(),
        wind_speed: data.wind.speed,
        pressure: data.main.pressure,
    }
}
