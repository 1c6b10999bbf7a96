use std::path::PathBuf;
use std::sync::Arc;

use pdfqa_ingest::TextExtractor;
use pdfqa_llm::CompletionClient;

/// Immutable per-process state shared by every request.
pub struct AppState {
    pub extractor: Arc<dyn TextExtractor>,
    pub completion: CompletionClient,
    /// Directory for transient upload files.
    pub temp_dir: PathBuf,
}
