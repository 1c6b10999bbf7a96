pub mod document;

pub use document::{
    extract_text, is_allowed_file, ExtractionError, PdfExtractor, TextExtractor,
    ALLOWED_EXTENSIONS,
};
