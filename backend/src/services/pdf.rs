//! Soil report text extraction
//!
//! PDF parsing is CPU-bound, so it runs on the blocking pool.

use axum::body::Bytes;

use crate::error::{AppError, AppResult};

/// Function turning PDF bytes into plain text
pub type TextExtractor = fn(&[u8]) -> AppResult<String>;

/// Extract text with the `pdf-extract` crate
pub fn extract_pdf_text(bytes: &[u8]) -> AppResult<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| AppError::PdfExtraction(e.to_string()))
}

/// Run `extractor` off the async executor and reject documents with no text
pub async fn extract_report_text(extractor: TextExtractor, report: Bytes) -> AppResult<String> {
    let size = report.len();
    let text = tokio::task::spawn_blocking(move || extractor(&report))
        .await
        .map_err(|e| AppError::PdfExtraction(format!("Extraction task failed: {}", e)))??;

    let text = collapse_blank_lines(&text);
    if text.is_empty() {
        return Err(AppError::EmptyDocument);
    }

    tracing::debug!(bytes = size, chars = text.chars().count(), "Extracted report text");
    Ok(text)
}

/// Trim lines and collapse runs of blank lines into one
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run = true;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if blank_run {
                out.push('\n');
            }
        }
        out.push_str(line);
        blank_run = false;
    }
    out
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
