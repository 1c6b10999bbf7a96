pub mod completion;
pub mod provider;
pub mod providers;

pub use completion::CompletionClient;
pub use provider::{LlmError, LlmProvider, Message, Role, SamplingParams};
