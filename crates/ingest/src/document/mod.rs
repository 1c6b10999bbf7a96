mod pdf;

use std::path::Path;

use thiserror::Error;

pub use pdf::PdfExtractor;

/// Lowercased file extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid PDF: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a document on disk into plain text.
///
/// Implementations are blocking; async callers should run them on the
/// blocking pool. An empty string means the document parsed but carries no
/// text layer (scanned/image-only PDFs), which is not an error here.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Extract the full text of the PDF at `path` with the default extractor.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    PdfExtractor.extract(path)
}

/// Whether the declared filename carries an allowed extension.
///
/// Only the suffix after the last `.` is considered, case-insensitively.
pub fn is_allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_pdf_any_case() {
        assert!(is_allowed_file("report.pdf"));
        assert!(is_allowed_file("REPORT.PDF"));
        assert!(is_allowed_file("archive.tar.Pdf"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_allowed_file("notes.txt"));
        assert!(!is_allowed_file("report.pdf.exe"));
        assert!(!is_allowed_file("pdf"));
        assert!(!is_allowed_file(""));
    }

    #[test]
    fn bare_dot_prefix_still_counts_as_extension() {
        assert!(is_allowed_file(".pdf"));
    }
}
