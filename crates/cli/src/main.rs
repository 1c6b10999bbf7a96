mod chat;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use pdfqa_ingest::PdfExtractor;
use pdfqa_llm::CompletionClient;

use crate::chat::Chatbot;
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Quiet by default so logs do not interleave with the conversation.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    pdfqa_core::config::load_dotenv();
    let config = pdfqa_core::Config::from_env();
    config.validate().context("invalid configuration")?;

    let completion = CompletionClient::from_config(&config.llm)
        .context("failed to build completion client")?;
    let chatbot = Chatbot::new(Arc::new(PdfExtractor), completion);

    let mut terminal = Terminal::stdio();
    let outcome = chatbot.run(&mut terminal).await?;
    tracing::debug!("Chat session ended: {:?}", outcome);
    Ok(ExitCode::from(outcome.exit_status()))
}
