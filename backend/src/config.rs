//! Configuration management for the Soil Advisor service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SOIL_ prefix
//! 4. The conventional GEMINI_API_KEY, WEATHER_API_KEY and PORT variables

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Gemini completion API configuration
    pub gemini: GeminiConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Upload limits
    pub upload: UploadConfig,

    /// Analysis pipeline settings
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key, required
    pub api_key: String,

    /// Base URL of the Generative Language API
    pub base_url: String,

    /// Model name used for every completion
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. Weather features are disabled without it.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Weather API endpoint
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Maximum request body size for uploads, in bytes
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Location used when the upload does not name one
    pub default_location: String,

    /// Report text beyond this many characters is not sent to the model
    pub max_report_chars: usize,
}

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SOIL_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("gemini.model", "gemini-1.5-flash")?
            .set_default("gemini.timeout_secs", 60)?
            .set_default("weather.base_url", DEFAULT_WEATHER_BASE_URL)?
            .set_default("upload.max_bytes", 10 * 1024 * 1024)?
            .set_default("analysis.default_location", shared::DEFAULT_LOCATION)?
            .set_default("analysis.max_report_chars", 30_000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SOIL_ prefix)
            .add_source(
                Environment::with_prefix("SOIL")
                    .separator("__")
                    .try_parsing(true),
            )
            // Conventional variable names win over everything else
            .set_override_option("gemini.api_key", non_blank_env("GEMINI_API_KEY"))?
            .set_override_option("weather.api_key", non_blank_env("WEATHER_API_KEY"))?
            .set_override_option("server.port", non_blank_env("PORT"))?
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.normalize()?;
        Ok(config)
    }

    /// Reject a blank Gemini key and treat a blank weather key as absent
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "gemini.api_key is required (set GEMINI_API_KEY)".to_string(),
            ));
        }
        if self
            .weather
            .api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            self.weather.api_key = None;
        }
        Ok(())
    }

    /// Whether a weather API key is configured
    pub fn weather_enabled(&self) -> bool {
        self.weather.api_key.is_some()
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
