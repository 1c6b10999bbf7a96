//! HTTP endpoints for document extraction, summarization, and Q&A.
//!
//! Shared error shape, status helpers, and multipart form reading live here.

mod ask;
mod documents;
mod health;

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::upload::UploadedDocument;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);
pub(crate) type ApiResult<T> = Result<T, ApiError>;

// ── Helpers ─────────────────────────────────────────────────────

pub(crate) fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: msg.into() }))
}

pub(crate) fn bad_request(msg: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, msg)
}

pub(crate) fn unsupported_media_type(msg: impl Into<String>) -> ApiError {
    api_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, msg)
}

pub(crate) fn unprocessable(msg: impl Into<String>) -> ApiError {
    api_error(StatusCode::UNPROCESSABLE_ENTITY, msg)
}

pub(crate) fn internal_error(e: impl std::fmt::Display) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn multipart_error(e: MultipartError) -> ApiError {
    api_error(e.status(), format!("Multipart error: {}", e.body_text()))
}

// ── Multipart form ───────────────────────────────────────────────

/// A file part as sent by the client, before validation.
pub(crate) struct FilePart {
    /// Empty when the part declared `filename=""`.
    pub filename: String,
    pub bytes: Bytes,
}

/// The fields this API reads from a multipart body.
#[derive(Default)]
pub(crate) struct UploadForm {
    pub file: Option<FilePart>,
    pub question: Option<String>,
}

/// Drain a multipart body, keeping the first `file` upload and the first
/// `question` field. Other fields are ignored.
pub(crate) async fn read_form(multipart: &mut Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            // A part without a `filename=` attribute is a plain form value.
            Some("file") if form.file.is_none() && field.file_name().is_some() => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.file = Some(FilePart { filename, bytes });
            }
            Some("question") if form.question.is_none() => {
                form.question = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }
    Ok(form)
}

/// A non-multipart body carries no file part at all.
pub(crate) fn require_multipart(
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Multipart> {
    multipart.map_err(|e| {
        warn!("Rejected non-multipart upload: {}", e.body_text());
        bad_request("No file uploaded.")
    })
}

/// Validate the `file` part of a form.
pub(crate) fn require_upload(file: Option<FilePart>) -> ApiResult<UploadedDocument> {
    let part = file.ok_or_else(|| bad_request("No file uploaded."))?;
    UploadedDocument::validate(&part.filename, part.bytes)
}

/// Text made only of whitespace counts as no text.
pub(crate) fn require_text(text: &str) -> ApiResult<()> {
    if text.trim().is_empty() {
        return Err(unprocessable("No text found in PDF."));
    }
    Ok(())
}

// ── Re-exports ───────────────────────────────────────────────────

pub use ask::ask;
pub use documents::{extract, summarize};
pub use health::health;
