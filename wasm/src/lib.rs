//! WebAssembly module for the Soil Advisor upload form
//!
//! Provides client-side helpers for:
//! - Listing the soil metric keys the backend expects
//! - Sanity-checking manually entered soil data before posting it
//! - Cleaning fenced JSON copied out of a model reply

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::reply::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("soil-advisor wasm module loaded"));
}

/// The soil metric keys, in the order the backend asks the model for them
#[wasm_bindgen]
pub fn soil_metric_keys() -> js_sys::Array {
    SOIL_METRIC_KEYS
        .iter()
        .map(|key| JsValue::from_str(key))
        .collect()
}

/// Return a JSON array of warnings for a soil data JSON object
#[wasm_bindgen]
pub fn soil_data_warnings(soil_json: &str) -> Result<String, JsValue> {
    let metrics: SoilMetrics = serde_json::from_str(soil_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid soil data JSON: {}", e)))?;

    let warnings = soil_metric_warnings(&metrics);
    serde_json::to_string(&warnings)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode warnings: {}", e)))
}

/// Count how many metrics a soil data JSON object actually reports
#[wasm_bindgen]
pub fn reported_metric_count(soil_json: &str) -> Result<u32, JsValue> {
    let metrics: SoilMetrics = serde_json::from_str(soil_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid soil data JSON: {}", e)))?;
    Ok(metrics.reported_count() as u32)
}

/// Strip markdown code fences from pasted model output
#[wasm_bindgen]
pub fn clean_model_reply(text: &str) -> String {
    strip_code_fences(text)
}

/// Check whether a pasted model reply contains usable soil data
#[wasm_bindgen]
pub fn is_valid_soil_reply(text: &str) -> bool {
    parse_model_reply::<SoilMetrics>(text).is_parsed()
}
