//! Error handling for the Soil Advisor service
//!
//! Every failure becomes a JSON body with a stable code, a short message and,
//! for upstream failures, the underlying detail string.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::MalformedReply;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client input errors
    #[error("No soil report file uploaded")]
    MissingUpload,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Upload exceeds the size limit")]
    UploadTooLarge,

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("The PDF contains no extractable text")]
    EmptyDocument,

    // Upstream and parsing errors
    #[error("PDF extraction failed: {0}")]
    PdfExtraction(String),

    #[error("AI service error: {0}")]
    AiService(String),

    #[error(transparent)]
    MalformedModelReply(#[from] MalformedReply),

    #[error("Weather service is not configured")]
    WeatherNotConfigured,

    #[error("Weather service error: {0}")]
    WeatherService(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Shorthand for a missing or blank required field
    pub fn missing_field(field: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: format!("{} is required", field),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
            field: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::MissingUpload => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("MISSING_FILE", "No soil report file uploaded"),
            ),
            AppError::InvalidUpload(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("INVALID_UPLOAD", "The upload could not be read")
                    .with_details(msg.clone()),
            ),
            AppError::UploadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorDetail::new("UPLOAD_TOO_LARGE", "The uploaded file is too large"),
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone())
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::EmptyDocument => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("EMPTY_DOCUMENT", "The PDF contains no extractable text"),
            ),
            AppError::PdfExtraction(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("PDF_EXTRACTION_ERROR", "Failed to read the soil report")
                    .with_details(msg.clone()),
            ),
            AppError::AiService(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("AI_SERVICE_ERROR", "The AI service request failed")
                    .with_details(msg.clone()),
            ),
            AppError::MalformedModelReply(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "MALFORMED_MODEL_REPLY",
                    "The AI service returned data that could not be parsed",
                )
                .with_details(err.reason.clone()),
            ),
            AppError::WeatherNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new(
                    "WEATHER_NOT_CONFIGURED",
                    "Weather data is unavailable: no weather API key configured",
                ),
            ),
            AppError::WeatherService(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("WEATHER_SERVICE_ERROR", "Failed to fetch weather data")
                    .with_details(msg.clone()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", "An internal server error occurred"),
            ),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Client error: {:?}", self);
        }

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_detail,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
