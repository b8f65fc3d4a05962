//! Soil field extraction through the completion API

use shared::{soil_metric_warnings, SoilMetrics, SOIL_METRIC_KEYS};

use crate::error::AppResult;
use crate::external::GeminiClient;
use crate::services::pdf::truncate_chars;

/// Service turning soil report text into `SoilMetrics`
#[derive(Clone)]
pub struct SoilExtractionService {
    gemini: GeminiClient,
    max_report_chars: usize,
}

/// Build the extraction instruction for a report
pub fn build_soil_prompt(report_text: &str) -> String {
    let keys = SOIL_METRIC_KEYS.join(", ");
    format!(
        "You are an agronomy assistant reading a laboratory soil test report.\n\
         Extract the soil metrics from the report text below.\n\
         Respond with a single minified JSON object and nothing else: \
         no markdown, no explanation.\n\
         The object must have exactly these keys: {keys}.\n\
         Every value must be a plain number or null when the report does not state it.\n\
         Units: moisture and organicMatter in percent, conductivity in dS/m, \
         nitrogen, phosphorus, potassium, calcium, magnesium and sulfur in mg/kg, \
         pathogenCount in CFU/g.\n\n\
         Report text:\n\"\"\"\n{report_text}\n\"\"\""
    )
}

impl SoilExtractionService {
    pub fn new(gemini: GeminiClient, max_report_chars: usize) -> Self {
        Self {
            gemini,
            max_report_chars,
        }
    }

    /// Ask the model for the fixed metric set found in `report_text`
    pub async fn extract_metrics(&self, report_text: &str) -> AppResult<SoilMetrics> {
        let text = truncate_chars(report_text, self.max_report_chars);
        if text.len() < report_text.len() {
            tracing::info!(
                max_chars = self.max_report_chars,
                "Report text truncated before extraction"
            );
        }

        let metrics: SoilMetrics = self.gemini.generate_json(&build_soil_prompt(text)).await?;

        tracing::info!(
            reported = metrics.reported_count(),
            total = SOIL_METRIC_KEYS.len(),
            "Soil metrics extracted"
        );
        for warning in soil_metric_warnings(&metrics) {
            tracing::warn!(key = warning.key, value = warning.value, "{}", warning.message);
        }

        Ok(metrics)
    }
}
