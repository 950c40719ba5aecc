//! Async bridge over a blocking completion service

use crate::error::ExtractorError;
use citelens_domain::{CompletionRequest, CompletionService};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Runs blocking completion calls off the async runtime with a deadline
pub struct CompletionClient<L> {
    provider: Arc<L>,
    timeout: Duration,
}

impl<L> Clone for CompletionClient<L> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            timeout: self.timeout,
        }
    }
}

impl<L> CompletionClient<L>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new client
    pub fn new(provider: Arc<L>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Complete a request, failing if it takes longer than the timeout
    pub async fn complete(&self, request: CompletionRequest) -> Result<String, ExtractorError> {
        let provider = Arc::clone(&self.provider);
        debug!(
            "Completion request: {} prompt chars, max_tokens={}",
            request.prompt.len(),
            request.max_tokens
        );

        // LLM providers are blocking
        let call = tokio::task::spawn_blocking(move || {
            provider
                .complete(&request)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        });

        timeout(self.timeout, call)
            .await
            .map_err(|_| ExtractorError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ExtractorError::Join(e.to_string()))?
    }
}
