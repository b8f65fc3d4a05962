//! Sanity checks for soil metrics
//!
//! These never reject data. The backend logs the warnings and the browser
//! module shows them next to manually entered values.

use serde::Serialize;

use crate::models::SoilMetrics;

/// A metric value outside its physically plausible range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricWarning {
    pub key: &'static str,
    pub value: f64,
    pub message: String,
}

/// Plausible range for a metric key, inclusive
pub fn metric_range(key: &str) -> (f64, f64) {
    match key {
        "phLevel" => (0.0, 14.0),
        "moisture" | "organicMatter" => (0.0, 100.0),
        _ => (0.0, f64::MAX),
    }
}

/// Check a single metric value against its plausible range
pub fn check_metric(key: &'static str, value: f64) -> Option<MetricWarning> {
    let (min, max) = metric_range(key);
    if !value.is_finite() || value < min || value > max {
        let message = if max == f64::MAX {
            format!("{} must not be negative (got {})", key, value)
        } else {
            format!("{} should be between {} and {} (got {})", key, min, max, value)
        };
        return Some(MetricWarning {
            key,
            value,
            message,
        });
    }
    None
}

/// Collect warnings for every reported metric that looks implausible
pub fn soil_metric_warnings(metrics: &SoilMetrics) -> Vec<MetricWarning> {
    metrics
        .entries()
        .iter()
        .filter_map(|&(key, value)| value.and_then(|v| check_metric(key, v)))
        .collect()
}
