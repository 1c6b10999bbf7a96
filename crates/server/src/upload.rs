//! Uploaded documents and their transient on-disk lifecycle.
//!
//! An upload is validated in memory first. Only accepted uploads are written
//! to disk, into a uniquely named `.pdf` temp file that lives exactly as long
//! as the blocking extraction task holding it.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use pdfqa_ingest::{is_allowed_file, ExtractionError, TextExtractor};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::api::{bad_request, ApiResult};

/// A validated upload: raw bytes plus the filename the client declared.
#[derive(Debug)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    /// Accept a declared filename and payload, or reject with a 400.
    pub fn validate(filename: &str, bytes: Bytes) -> ApiResult<Self> {
        Self::check_filename(filename)?;
        Ok(Self {
            filename: filename.to_string(),
            bytes,
        })
    }

    /// Filename rules alone, for callers that must reject before reading
    /// the payload.
    pub fn check_filename(filename: &str) -> ApiResult<()> {
        if filename.is_empty() {
            return Err(bad_request("No filename provided."));
        }
        if !is_allowed_file(filename) {
            return Err(bad_request("Only .pdf files are allowed."));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to write temporary file: {0}")]
    Materialize(#[source] std::io::Error),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("extraction task aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// A `.pdf` temp file removed when dropped.
pub struct TransientPdf {
    file: NamedTempFile,
}

impl TransientPdf {
    pub fn create_in(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Write `document` to a transient file, extract its text, and remove the
/// file again before returning.
///
/// Runs on the blocking pool. The temp file is owned by the blocking closure,
/// so it is released on success, on extraction failure, and when the
/// extractor panics.
pub async fn extract_upload(
    extractor: Arc<dyn TextExtractor>,
    temp_dir: PathBuf,
    document: UploadedDocument,
) -> Result<String, UploadError> {
    tokio::task::spawn_blocking(move || -> Result<String, UploadError> {
        let transient =
            TransientPdf::create_in(&temp_dir, &document.bytes).map_err(UploadError::Materialize)?;
        tracing::debug!(
            "Materialized '{}' ({} bytes) at {}",
            document.filename,
            document.bytes.len(),
            transient.path().display()
        );
        let text = extractor.extract(transient.path())?;
        Ok(text)
    })
    .await?
}

/// Reduce a client-supplied filename to a safe ASCII name.
///
/// Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9._-]` is dropped, and leading/trailing dots and underscores
/// are trimmed.
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "upload.pdf".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl TextExtractor for Failing {
        fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
            assert!(path.exists());
            Err(ExtractionError::PdfError("corrupt xref".into()))
        }
    }

    struct Panicking;

    impl TextExtractor for Panicking {
        fn extract(&self, _path: &Path) -> Result<String, ExtractionError> {
            panic!("malformed font program");
        }
    }

    fn doc() -> UploadedDocument {
        UploadedDocument::validate("doc.pdf", Bytes::from_static(b"%PDF-1.4")).unwrap()
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn sanitize_strips_paths_and_spaces() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("My Report 2024.pdf"), "My_Report_2024.pdf");
        assert_eq!(sanitize_filename("C:\\Users\\bob\\cv.pdf"), "C_Users_bob_cv.pdf");
        assert_eq!(sanitize_filename("résumé.pdf"), "rsum.pdf");
        assert_eq!(sanitize_filename("..."), "upload.pdf");
    }

    #[test]
    fn validate_rejects_bad_names() {
        let err = UploadedDocument::validate("", Bytes::new()).unwrap_err();
        assert_eq!(err.0, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.1.error, "No filename provided.");

        let err = UploadedDocument::validate("notes.txt", Bytes::new()).unwrap_err();
        assert_eq!(err.1.error, "Only .pdf files are allowed.");
    }

    #[test]
    fn transient_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let transient = TransientPdf::create_in(dir.path(), b"abc").unwrap();
        let path = transient.path().to_path_buf();
        assert_eq!(path.extension().unwrap(), "pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
        drop(transient);
        assert!(!path.exists());
        assert_eq!(file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn extraction_error_still_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_upload(Arc::new(Failing), dir.path().to_path_buf(), doc())
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Extraction(_)));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn extractor_panic_is_contained_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_upload(Arc::new(Panicking), dir.path().to_path_buf(), doc())
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Aborted(_)));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn missing_temp_dir_is_a_materialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        let err = extract_upload(Arc::new(Failing), gone, doc()).await.unwrap_err();
        assert!(matches!(err, UploadError::Materialize(_)));
    }
}
