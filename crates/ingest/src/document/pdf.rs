use std::path::Path;

use super::{ExtractionError, TextExtractor};

/// Text extraction backed by `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path)?;

        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

        if text.trim().is_empty() {
            // Parsed fine but no text layer (scanned/image PDF).
            tracing::warn!("PDF at {} contains no extractable text", path.display());
        } else {
            tracing::debug!("Extracted {} chars from {}", text.chars().count(), path.display());
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Assemble a one-page PDF with a correct xref table. `content` is the
    /// raw page content stream.
    fn build_pdf(content: &str) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for off in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_at
            )
            .as_bytes(),
        );
        out
    }

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn extracts_text_layer() {
        let pdf = build_pdf("BT /F1 24 Tf 72 700 Td (Hello PDF) Tj ET");
        let file = write_temp(&pdf);

        let text = PdfExtractor.extract(file.path()).unwrap();
        assert!(text.contains("Hello"), "unexpected text: {text:?}");
    }

    #[test]
    fn page_without_text_yields_empty_string() {
        // A filled rectangle and nothing else.
        let pdf = build_pdf("0 0 1 rg 72 72 200 200 re f");
        let file = write_temp(&pdf);

        let text = PdfExtractor.extract(file.path()).unwrap();
        assert!(text.trim().is_empty());
    }

    #[test]
    fn garbage_is_a_pdf_error() {
        let file = write_temp(b"this is definitely not a pdf");
        let err = PdfExtractor.extract(file.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfExtractor
            .extract(&dir.path().join("absent.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
