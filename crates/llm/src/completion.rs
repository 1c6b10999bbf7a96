use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message, SamplingParams};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Fixed sampling parameters for every document request.
pub const DOCUMENT_PARAMS: SamplingParams = SamplingParams {
    temperature: 0.7,
    top_p: 1.0,
    max_tokens: 300,
};

/// Summarizes documents and answers questions about them via an LLM.
///
/// Every call is a single request; failures come back as `LlmError` and are
/// never folded into the returned text.
pub struct CompletionClient {
    provider: Box<dyn LlmProvider>,
    params: SamplingParams,
}

impl CompletionClient {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider,
            params: DOCUMENT_PARAMS,
        }
    }

    /// Build from config, creating the OpenAI-compatible provider.
    pub fn from_config(llm_config: &pdfqa_core::config::LlmConfig) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(llm_config)?;
        Ok(Self::new(provider))
    }

    pub async fn summarize(&self, text: &str) -> Result<String, LlmError> {
        info!("Summarizing {} chars", text.chars().count());
        self.send(summarize_prompt(text)).await
    }

    pub async fn answer(&self, text: &str, question: &str) -> Result<String, LlmError> {
        info!(
            "Answering {}-char question over {} chars",
            question.chars().count(),
            text.chars().count()
        );
        self.send(answer_prompt(text, question)).await
    }

    async fn send(&self, user_prompt: String) -> Result<String, LlmError> {
        let messages = vec![Message::system(SYSTEM_PROMPT), Message::user(user_prompt)];
        let response = self.provider.complete(messages, self.params).await?;
        debug!("LLM response: {} chars", response.chars().count());
        Ok(response)
    }
}

fn summarize_prompt(text: &str) -> String {
    format!("Summarize the following text: {}", text)
}

fn answer_prompt(text: &str, question: &str) -> String {
    format!(
        "Based on the following text: {}\n\n Answer this question: {}",
        text, question
    )
}
