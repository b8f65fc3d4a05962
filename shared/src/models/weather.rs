//! Weather data models

use serde::{Deserialize, Serialize};

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: i32,
    pub description: String,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Atmospheric pressure (hPa)
    pub pressure: i32,
}
