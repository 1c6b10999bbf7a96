//! Single-file endpoints: raw text extraction and summarization.

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::state::AppState;
use crate::upload::{extract_upload, sanitize_filename};

use super::{internal_error, read_form, require_multipart, require_text, require_upload, ApiResult};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub filename: String,
    /// Length of `text` in characters (Unicode scalar values).
    pub chars: usize,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

// ── POST /extract ─────────────────────────────────

/// Return the raw text of an uploaded PDF (multipart field `file`).
pub async fn extract(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ExtractResponse>> {
    let mut multipart = require_multipart(multipart)?;
    let form = read_form(&mut multipart).await?;
    let document = require_upload(form.file)?;
    let filename = sanitize_filename(&document.filename);

    let text = extract_upload(state.extractor.clone(), state.temp_dir.clone(), document)
        .await
        .map_err(|e| {
            warn!("Extraction of '{}' failed: {}", filename, e);
            internal_error(format!("PDF extraction failed: {e}"))
        })?;
    require_text(&text)?;

    let chars = text.chars().count();
    info!("Extracted '{}': {} chars", filename, chars);

    Ok(Json(ExtractResponse {
        filename,
        chars,
        text,
    }))
}

// ── POST /summarize ───────────────────────────────

/// Summarize an uploaded PDF (multipart field `file`).
///
/// A completion failure is a 500, never a 200 carrying the error text.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<SummaryResponse>> {
    let mut multipart = require_multipart(multipart)?;
    let form = read_form(&mut multipart).await?;
    let document = require_upload(form.file)?;
    let filename = sanitize_filename(&document.filename);

    let text = extract_upload(state.extractor.clone(), state.temp_dir.clone(), document)
        .await
        .map_err(|e| {
            warn!("Extraction of '{}' failed: {}", filename, e);
            internal_error(format!("Summarization failed: {e}"))
        })?;
    require_text(&text)?;

    let summary = state.completion.summarize(&text).await.map_err(|e| {
        warn!("Summarizing '{}' failed: {}", filename, e);
        internal_error(format!("Summarization failed: {e}"))
    })?;
    info!(
        "Summarized '{}' ({} chars in, {} out)",
        filename,
        text.chars().count(),
        summary.chars().count()
    );

    Ok(Json(SummaryResponse { summary }))
}
