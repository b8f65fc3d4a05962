//! Soil metric models

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// The fixed key set requested from the model, in prompt order
pub const SOIL_METRIC_KEYS: [&str; 11] = [
    "moisture",
    "phLevel",
    "conductivity",
    "organicMatter",
    "nitrogen",
    "phosphorus",
    "potassium",
    "calcium",
    "magnesium",
    "sulfur",
    "pathogenCount",
];

/// Laboratory soil metrics extracted from a soil report.
///
/// Values keep the exact JSON number they arrived as, so an integer `27`
/// is written back as `27` and not `27.0`. Missing keys become `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilMetrics {
    /// Moisture content (%)
    #[serde(default)]
    pub moisture: Option<Number>,
    #[serde(default)]
    pub ph_level: Option<Number>,
    /// Electrical conductivity (dS/m)
    #[serde(default)]
    pub conductivity: Option<Number>,
    /// Organic matter (%)
    #[serde(default)]
    pub organic_matter: Option<Number>,
    #[serde(default)]
    pub nitrogen: Option<Number>,
    #[serde(default)]
    pub phosphorus: Option<Number>,
    #[serde(default)]
    pub potassium: Option<Number>,
    #[serde(default)]
    pub calcium: Option<Number>,
    #[serde(default)]
    pub magnesium: Option<Number>,
    #[serde(default)]
    pub sulfur: Option<Number>,
    /// Pathogen count (CFU/g)
    #[serde(default)]
    pub pathogen_count: Option<Number>,
}

impl SoilMetrics {
    /// Iterate over `(key, value)` pairs in `SOIL_METRIC_KEYS` order
    pub fn entries(&self) -> [(&'static str, Option<f64>); 11] {
        let v = |n: &Option<Number>| n.as_ref().and_then(Number::as_f64);
        [
            ("moisture", v(&self.moisture)),
            ("phLevel", v(&self.ph_level)),
            ("conductivity", v(&self.conductivity)),
            ("organicMatter", v(&self.organic_matter)),
            ("nitrogen", v(&self.nitrogen)),
            ("phosphorus", v(&self.phosphorus)),
            ("potassium", v(&self.potassium)),
            ("calcium", v(&self.calcium)),
            ("magnesium", v(&self.magnesium)),
            ("sulfur", v(&self.sulfur)),
            ("pathogenCount", v(&self.pathogen_count)),
        ]
    }

    /// Number of metrics the report actually stated
    pub fn reported_count(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_keep_their_representation() {
        let input = json!({"moisture": 27, "phLevel": 6.3, "pathogenCount": null});
        let metrics: SoilMetrics = serde_json::from_value(input).unwrap();
        let output = serde_json::to_value(&metrics).unwrap();

        assert_eq!(output["moisture"], json!(27));
        assert_eq!(output["phLevel"], json!(6.3));
        assert_eq!(output["pathogenCount"], json!(null));
        assert_eq!(output["sulfur"], json!(null));
    }

    #[test]
    fn test_serialized_keys_match_fixed_set() {
        let output = serde_json::to_value(SoilMetrics::default()).unwrap();
        let object = output.as_object().unwrap();

        assert_eq!(object.len(), SOIL_METRIC_KEYS.len());
        for key in SOIL_METRIC_KEYS {
            assert!(object.contains_key(key), "missing key {}", key);
        }
    }

    #[test]
    fn test_entries_follow_key_order() {
        let keys: Vec<&str> = SoilMetrics::default()
            .entries()
            .iter()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, SOIL_METRIC_KEYS.to_vec());
    }

    #[test]
    fn test_string_values_are_rejected() {
        let input = json!({"moisture": "27%"});
        assert!(serde_json::from_value::<SoilMetrics>(input).is_err());
    }

    #[test]
    fn test_reported_count() {
        let metrics: SoilMetrics =
            serde_json::from_value(json!({"moisture": 27, "nitrogen": 140})).unwrap();
        assert_eq!(metrics.reported_count(), 2);
    }
}
