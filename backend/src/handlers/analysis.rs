//! HTTP handler for soil report uploads

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use shared::{ApiEnvelope, SoilAnalysisReport};

use crate::error::{AppError, AppResult};
use crate::services::{pdf::extract_report_text, AnalysisService};
use crate::AppState;

/// Multipart field carrying the PDF
pub const REPORT_FIELD: &str = "soilReport";
/// Optional multipart field naming the farm location
pub const LOCATION_FIELD: &str = "location";

/// Fields read from an analyze upload
#[derive(Debug, Default)]
pub struct SoilReportUpload {
    pub report: Option<Bytes>,
    pub file_name: Option<String>,
    pub location: Option<String>,
}

fn upload_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadTooLarge
    } else {
        AppError::InvalidUpload(e.body_text())
    }
}

/// Read the report and location fields, ignoring anything else
pub async fn read_soil_report_upload(multipart: &mut Multipart) -> AppResult<SoilReportUpload> {
    let mut upload = SoilReportUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            REPORT_FIELD => {
                upload.file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(upload_error)?;
                // A zero-length file part counts as no file
                if !bytes.is_empty() {
                    upload.report = Some(bytes);
                }
            }
            LOCATION_FIELD => {
                let text = field.text().await.map_err(upload_error)?;
                let text = text.trim();
                if !text.is_empty() {
                    upload.location = Some(text.to_string());
                }
            }
            other => tracing::debug!(field = other, "Ignoring unexpected multipart field"),
        }
    }

    Ok(upload)
}

/// Analyse an uploaded soil report
pub async fn analyze_soil_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiEnvelope<SoilAnalysisReport>>> {
    let upload = read_soil_report_upload(&mut multipart).await?;
    let report = upload.report.ok_or(AppError::MissingUpload)?;
    let location = upload
        .location
        .unwrap_or_else(|| state.config.analysis.default_location.clone());

    tracing::info!(
        file = upload.file_name.as_deref().unwrap_or("unnamed"),
        bytes = report.len(),
        %location,
        "Analysing soil report"
    );

    let text = extract_report_text(state.text_extractor, report).await?;
    let analysis = AnalysisService::new(&state)
        .analyze_report(&text, &location)
        .await?;

    Ok(Json(ApiEnvelope::ok(analysis)))
}
