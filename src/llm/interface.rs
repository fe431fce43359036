use async_trait::async_trait;

use crate::error::ProviderResult;

/// Output format requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Text,
    /// Ask the provider to emit a JSON document instead of prose
    Json,
}

/// Interface for a stateless generative language model.
/// Every call is a single prompt with no conversation memory.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str, mode: ResponseMode) -> ProviderResult<String>;
}
