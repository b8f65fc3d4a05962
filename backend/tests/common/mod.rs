//! Test helpers: mock Gemini and OpenWeatherMap servers plus request builders

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tower::ServiceExt;

use soil_advisor_backend::config::{
    AnalysisConfig, Config, GeminiConfig, ServerConfig, UploadConfig, WeatherConfig,
};
use soil_advisor_backend::error::AppResult;
use soil_advisor_backend::{create_app, AppState};

pub const GEMINI_KEY: &str = "test-gemini-key";
pub const WEATHER_KEY: &str = "test-weather-key";

pub const SAMPLE_REPORT_TEXT: &str = "SOIL TEST REPORT\n\
    Moisture: 27 %\npH: 6.3\nEC: 0.45 dS/m\nOrganic matter: 2.1 %\n\
    Available N: 280 mg/kg\nAvailable P: 22 mg/kg\nAvailable K: 190 mg/kg\n\
    Ca: 1200 mg/kg\nMg: 180 mg/kg\nS: 12 mg/kg\nPathogen count: 150 CFU/g";

/// Soil metrics as the mock model returns them
pub fn sample_soil_data() -> Value {
    json!({
        "moisture": 27,
        "phLevel": 6.3,
        "conductivity": 0.45,
        "organicMatter": 2.1,
        "nitrogen": 280,
        "phosphorus": 22,
        "potassium": 190,
        "calcium": 1200,
        "magnesium": 180,
        "sulfur": 12,
        "pathogenCount": 150
    })
}

pub fn sample_crop_recommendation() -> Value {
    json!({
        "soilHealth": "Good",
        "recommendedCrops": ["Wheat", "Chickpea", "Mustard"],
        "pathogenAlert": {"detected": false, "message": "Pathogen count is within safe limits"},
        "soilImprovements": ["Incorporate farmyard manure", "Apply gypsum for sulfur"],
        "farmingPlan": {
            "season": "Rabi",
            "sowing": "Late October to mid November",
            "irrigation": ["Crown root initiation", "Flowering", "Grain filling"]
        },
        "nutrientRecommendations": ["Apply 120 kg/ha N in split doses"],
        "riskFactors": ["Low sulfur may limit oilseed yield"]
    })
}

pub fn sample_weather_recommendation() -> Value {
    json!({
        "weatherSuitability": "Suitable for sowing",
        "seasonalRecommendations": ["Sow wheat within the next two weeks"],
        "weatherAlerts": ["High afternoon temperatures"],
        "irrigationAdvice": "Irrigate lightly every 10 days",
        "farmingActivities": ["Prepare seedbed", "Apply basal fertiliser"]
    })
}

pub fn sample_owm_response() -> Value {
    json!({
        "coord": {"lon": 73.86, "lat": 18.52},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 29.5, "feels_like": 30.1, "pressure": 1011, "humidity": 48},
        "wind": {"speed": 4.2, "deg": 250},
        "name": "Pune"
    })
}

/// Behaviour and call log of the mock upstream APIs
#[derive(Clone)]
pub struct MockUpstream {
    pub gemini_hits: Arc<AtomicUsize>,
    pub weather_hits: Arc<AtomicUsize>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub weather_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    pub soil_reply: String,
    pub crop_reply: String,
    pub weather_recommendation_reply: String,
    pub gemini_status: u16,
    pub weather_status: u16,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            gemini_hits: Arc::new(AtomicUsize::new(0)),
            weather_hits: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            weather_queries: Arc::new(Mutex::new(Vec::new())),
            // Fenced, the way models usually answer
            soil_reply: format!("```json\n{}\n```", sample_soil_data()),
            crop_reply: sample_crop_recommendation().to_string(),
            weather_recommendation_reply: sample_weather_recommendation().to_string(),
            gemini_status: 200,
            weather_status: 200,
        }
    }

    pub fn with_soil_reply(mut self, reply: &str) -> Self {
        self.soil_reply = reply.to_string();
        self
    }

    pub fn with_crop_reply(mut self, reply: &str) -> Self {
        self.crop_reply = reply.to_string();
        self
    }

    pub fn with_weather_recommendation_reply(mut self, reply: &str) -> Self {
        self.weather_recommendation_reply = reply.to_string();
        self
    }

    pub fn with_gemini_status(mut self, status: u16) -> Self {
        self.gemini_status = status;
        self
    }

    pub fn with_weather_status(mut self, status: u16) -> Self {
        self.weather_status = status;
        self
    }

    pub fn gemini_hits(&self) -> usize {
        self.gemini_hits.load(Ordering::SeqCst)
    }

    pub fn weather_hits(&self) -> usize {
        self.weather_hits.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn weather_queries(&self) -> Vec<HashMap<String, String>> {
        self.weather_queries.lock().unwrap().clone()
    }

    /// Serve the mock on an ephemeral port and return its base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/models/:model", post(mock_generate_content))
            .route("/weather", get(mock_current_weather))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn mock_generate_content(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.gemini_hits.fetch_add(1, Ordering::SeqCst);

    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(GEMINI_KEY) {
        return (StatusCode::FORBIDDEN, "bad key").into_response();
    }

    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    mock.prompts.lock().unwrap().push(prompt.clone());

    if mock.gemini_status != 200 {
        let status = StatusCode::from_u16(mock.gemini_status).unwrap();
        return (status, "upstream exploded").into_response();
    }

    let reply = if prompt.contains("Report text:") {
        &mock.soil_reply
    } else if prompt.contains("Current weather") {
        &mock.weather_recommendation_reply
    } else {
        &mock.crop_reply
    };

    Json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": reply}]},
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}

async fn mock_current_weather(
    State(mock): State<MockUpstream>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    mock.weather_hits.fetch_add(1, Ordering::SeqCst);
    mock.weather_queries.lock().unwrap().push(query);

    if mock.weather_status != 200 {
        let status = StatusCode::from_u16(mock.weather_status).unwrap();
        return (status, Json(json!({"cod": "500", "message": "internal error"}))).into_response();
    }
    Json(sample_owm_response()).into_response()
}

pub fn test_config(base_url: &str, weather_key: Option<&str>) -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        gemini: GeminiConfig {
            api_key: GEMINI_KEY.to_string(),
            base_url: base_url.to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 10,
        },
        weather: WeatherConfig {
            api_key: weather_key.map(str::to_string),
            base_url: base_url.to_string(),
        },
        upload: UploadConfig {
            max_bytes: 1024 * 1024,
        },
        analysis: AnalysisConfig {
            default_location: "New Delhi, India".to_string(),
            max_report_chars: 30_000,
        },
    }
}

pub fn sample_text_extractor(_: &[u8]) -> AppResult<String> {
    Ok(SAMPLE_REPORT_TEXT.to_string())
}

/// Build the app against the mock, with a stub PDF extractor
pub fn test_app(config: Config) -> Router {
    let state = AppState::new(config)
        .unwrap()
        .with_text_extractor(sample_text_extractor);
    create_app(state)
}

pub const BOUNDARY: &str = "soil-advisor-test-boundary";

/// A single multipart part
pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                        name, value
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// JSON request with a body that may not be valid JSON
pub fn raw_json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request through the router and decode the JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}
