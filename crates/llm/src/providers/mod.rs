pub mod openai;

use std::time::Duration;

use pdfqa_core::config::LlmConfig;

use crate::provider::{LlmError, LlmProvider};

/// Create the completion provider described by config.
///
/// A missing API key does not fail here; the provider reports
/// `NotConfigured` on each call instead.
pub fn create_provider(llm_config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    if llm_config.api_key.is_none() {
        tracing::warn!("GITHUB_TOKEN not set; completion calls will fail until it is configured");
    }
    Ok(Box::new(openai::OpenAiProvider::new(
        llm_config.api_key.clone(),
        llm_config.model.clone(),
        llm_config.base_url.clone(),
        Duration::from_secs(llm_config.timeout_secs),
    )?))
}
