//! `POST /ask`: question answering over an uploaded PDF.
//!
//! The body may be multipart (`file` + `question`) or JSON
//! (`filename` + `file_base64` + `question`). The encoding is resolved once
//! into an [`AskInput`] variant; after validation both share one code path.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::state::AppState;
use crate::upload::{extract_upload, UploadedDocument};

use super::{
    api_error, bad_request, internal_error, read_form, require_text, require_upload,
    unsupported_media_type, ApiError, ApiResult, UploadForm,
};

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Standard alphabet with canonical padding; stray bits in the final
/// symbol are ignored.
const FILE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// JSON encoding of an ask request. Fields that are absent or not strings
/// are `None`.
#[derive(Debug, Default)]
pub(crate) struct AskJson {
    pub filename: Option<String>,
    pub file_base64: Option<String>,
    pub question: Option<String>,
}

impl AskJson {
    /// Read the body leniently: anything that is not a JSON object counts as
    /// an empty object.
    fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            filename: field("filename"),
            file_base64: field("file_base64"),
            question: field("question"),
        }
    }
}

/// An ask request in whichever encoding the client chose.
pub(crate) enum AskInput {
    Multipart(UploadForm),
    Json(AskJson),
}

/// A validated ask request.
pub(crate) struct AskRequest {
    pub document: UploadedDocument,
    pub question: String,
}

impl AskInput {
    pub(crate) fn into_request(self) -> ApiResult<AskRequest> {
        match self {
            AskInput::Multipart(form) => {
                let question = form.question.as_deref().unwrap_or("").trim().to_string();
                let document = require_upload(form.file)?;
                if question.is_empty() {
                    return Err(bad_request("Missing question."));
                }
                Ok(AskRequest { document, question })
            }
            AskInput::Json(body) => {
                let filename = body.filename.as_deref().unwrap_or("").trim().to_string();
                let file_base64 = body.file_base64.unwrap_or_default();
                let question = body.question.as_deref().unwrap_or("").trim().to_string();

                if filename.is_empty() || file_base64.is_empty() || question.is_empty() {
                    return Err(bad_request(
                        "filename, file_base64, and question are required.",
                    ));
                }
                UploadedDocument::check_filename(&filename)?;
                let bytes = FILE_BASE64
                    .decode(file_base64.as_bytes())
                    .map_err(|_| bad_request("file_base64 is not valid base64."))?;
                let document = UploadedDocument::validate(&filename, Bytes::from(bytes))?;
                Ok(AskRequest { document, question })
            }
        }
    }
}

impl<S> FromRequest<S> for AskInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
                warn!("Malformed multipart ask request: {}", e.body_text());
                bad_request(format!("Multipart error: {}", e.body_text()))
            })?;
            Ok(AskInput::Multipart(read_form(&mut multipart).await?))
        } else if content_type.starts_with("application/json") {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| api_error(e.status(), e.body_text()))?;
            Ok(AskInput::Json(AskJson::from_body(&body)))
        } else {
            Err(unsupported_media_type(
                "Unsupported Content-Type. Use multipart/form-data or application/json.",
            ))
        }
    }
}

// ── POST /ask ─────────────────────────────────────

/// Answer a question about an uploaded PDF.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    input: AskInput,
) -> ApiResult<Json<AskResponse>> {
    let AskRequest { document, question } = input.into_request()?;
    let filename = document.filename.clone();

    let text = extract_upload(state.extractor.clone(), state.temp_dir.clone(), document)
        .await
        .map_err(|e| {
            warn!("Extraction of '{}' failed: {}", filename, e);
            internal_error(format!("Q&A failed: {e}"))
        })?;
    require_text(&text)?;

    let answer = state.completion.answer(&text, &question).await.map_err(|e| {
        warn!("Answering over '{}' failed: {}", filename, e);
        internal_error(format!("Q&A failed: {e}"))
    })?;
    info!("Answered question over '{}' ({} chars)", filename, answer.chars().count());

    Ok(Json(AskResponse { answer }))
}
