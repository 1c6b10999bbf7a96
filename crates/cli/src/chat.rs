use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use pdfqa_ingest::TextExtractor;
use pdfqa_llm::CompletionClient;
use tracing::{debug, warn};

use crate::terminal::Terminal;

/// How a chat session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user typed `exit` or closed the input.
    Exited,
    /// The session stopped on a missing file, extraction problem or API error.
    Aborted,
}

impl Outcome {
    /// Process exit status: non-zero unless the user left on purpose.
    pub fn exit_status(self) -> u8 {
        match self {
            Outcome::Exited => 0,
            Outcome::Aborted => 1,
        }
    }
}

/// Interactive summarize-then-ask session over a single PDF.
pub struct Chatbot {
    extractor: Arc<dyn TextExtractor>,
    completion: CompletionClient,
}

impl Chatbot {
    pub fn new(extractor: Arc<dyn TextExtractor>, completion: CompletionClient) -> Self {
        Self {
            extractor,
            completion,
        }
    }

    pub async fn run<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<Outcome> {
        term.print_banner()?;

        let Some(raw_path) = term.prompt("Please enter the path to the PDF file: ")? else {
            return Ok(Outcome::Aborted);
        };
        let path = PathBuf::from(&raw_path);
        if !path.is_file() {
            term.print_error(&format!("Error: The file '{}' does not exist.", raw_path))?;
            return Ok(Outcome::Aborted);
        }

        term.print_heading("Extracting text from PDF...")?;
        let text = match self.extract(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Extraction of '{}' failed: {:#}", raw_path, e);
                term.print_error(&format!("PDF extraction failed: {:#}", e))?;
                return Ok(Outcome::Aborted);
            }
        };
        if text.trim().is_empty() {
            term.print_error("No text found in the PDF.")?;
            return Ok(Outcome::Aborted);
        }
        debug!("Extracted {} chars from '{}'", text.chars().count(), raw_path);

        term.print_heading("Summary of the PDF:")?;
        match self.completion.summarize(&text).await {
            Ok(summary) => term.print_answer(&summary)?,
            Err(e) => {
                term.print_error(&format!("Error with GitHub API: {}", e))?;
                return Ok(Outcome::Aborted);
            }
        }

        loop {
            term.print_heading("You can now ask questions about the document!")?;
            let question = match term.prompt("Enter your question (or type 'exit' to quit): ")? {
                Some(q) if !q.eq_ignore_ascii_case("exit") => q,
                _ => {
                    term.print_info("Exiting the chatbot. Goodbye!")?;
                    return Ok(Outcome::Exited);
                }
            };
            if question.is_empty() {
                continue;
            }

            match self.completion.answer(&text, &question).await {
                Ok(answer) => {
                    term.print_heading("Answer:")?;
                    term.print_answer(&answer)?;
                }
                Err(e) => {
                    term.print_error(&format!("Error with GitHub API: {}", e))?;
                    return Ok(Outcome::Aborted);
                }
            }
        }
    }

    /// Run the blocking extractor off the async workers.
    async fn extract(&self, path: PathBuf) -> Result<String> {
        let extractor = self.extractor.clone();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&path)).await??;
        Ok(text)
    }
}
