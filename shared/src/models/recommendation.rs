//! Recommendation models returned by the completion API
//!
//! The model decides the exact shape of a recommendation. Any JSON object is
//! accepted and serialized back unchanged; the accessors only read the
//! fields the prompts ask for, tolerating whatever type the model chose.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Overall soil health category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoilHealth {
    Excellent,
    Good,
    Fair,
    Poor,
    /// A label outside the requested categories, kept verbatim
    Other(String),
}

impl SoilHealth {
    /// Categories offered to the model
    pub const ALL: [SoilHealth; 4] = [
        SoilHealth::Excellent,
        SoilHealth::Good,
        SoilHealth::Fair,
        SoilHealth::Poor,
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Excellent" => SoilHealth::Excellent,
            "Good" => SoilHealth::Good,
            "Fair" => SoilHealth::Fair,
            "Poor" => SoilHealth::Poor,
            other => SoilHealth::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SoilHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilHealth::Excellent => write!(f, "Excellent"),
            SoilHealth::Good => write!(f, "Good"),
            SoilHealth::Fair => write!(f, "Fair"),
            SoilHealth::Poor => write!(f, "Poor"),
            SoilHealth::Other(label) => write!(f, "{}", label),
        }
    }
}

fn list_len(fields: &Map<String, Value>, key: &str) -> usize {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Crop recommendations for a set of soil metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropRecommendation(pub Map<String, Value>);

impl CropRecommendation {
    /// `soilHealth`, when the model sent it as a string
    pub fn soil_health(&self) -> Option<SoilHealth> {
        self.0
            .get("soilHealth")
            .and_then(Value::as_str)
            .map(SoilHealth::from_label)
    }

    pub fn recommended_crop_count(&self) -> usize {
        list_len(&self.0, "recommendedCrops")
    }

    /// `pathogenAlert.detected`, or `false` when absent or not a boolean
    pub fn pathogen_detected(&self) -> bool {
        self.0
            .get("pathogenAlert")
            .and_then(|alert| alert.get("detected"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Weather-aware farming recommendations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherRecommendation(pub Map<String, Value>);

impl WeatherRecommendation {
    pub fn weather_suitability(&self) -> Option<&str> {
        self.0.get("weatherSuitability").and_then(Value::as_str)
    }

    pub fn weather_alert_count(&self) -> usize {
        list_len(&self.0, "weatherAlerts")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
