//! Citelens Completion Providers
//!
//! Implementations of the `CompletionService` trait from `citelens-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scripted provider for testing
//! - `OpenAiProvider`: OpenAI-compatible chat-completions API
//! - `OllamaProvider`: Local Ollama API integration
//!
//! All providers block the calling thread; async callers should run them on
//! a blocking pool.
//!
//! # Examples
//!
//! ```
//! use citelens_domain::{CompletionRequest, CompletionService};
//! use citelens_llm::MockProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.complete(&CompletionRequest::new("test prompt")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

mod http;
pub mod ollama;
pub mod openai;

use citelens_domain::{CompletionRequest, CompletionService};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during completion calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credential rejected by the service
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No credential configured
    #[error("Missing API credential: {0}")]
    MissingCredential(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimitExceeded)
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(String),
}

#[derive(Debug, Clone)]
struct MockRule {
    fragment: String,
    reply: MockReply,
}

/// Mock completion provider for deterministic testing
///
/// Replies are chosen by the first rule whose fragment occurs in the prompt,
/// falling back to a default response. Every request is recorded.
///
/// # Examples
///
/// ```
/// use citelens_domain::{CompletionRequest, CompletionService};
/// use citelens_llm::MockProvider;
///
/// let mut provider = MockProvider::new("fallback");
/// provider.add_response("references section", "[1] A. Author, Paper, 2020.");
/// provider.add_error("citation sentences");
///
/// let refs = provider
///     .complete(&CompletionRequest::new("Isolate the references section"))
///     .unwrap();
/// assert_eq!(refs, "[1] A. Author, Paper, 2020.");
/// assert!(provider.complete(&CompletionRequest::new("List citation sentences")).is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<MockRule>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Respond with `response` whenever the prompt contains `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push(MockRule {
            fragment: fragment.into(),
            reply: MockReply::Text(response.into()),
        });
    }

    /// Fail whenever the prompt contains `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        lock(&self.rules).push(MockRule {
            fragment: fragment.into(),
            reply: MockReply::Fail("Mock error".to_string()),
        });
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    /// Forget recorded requests
    pub fn reset_call_count(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionService for MockProvider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        lock(&self.requests).push(request.clone());

        let rules = lock(&self.rules);
        let reply = rules
            .iter()
            .find(|rule| request.prompt.contains(&rule.fragment))
            .map(|rule| rule.reply.clone());

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail(reason)) => Err(LlmError::Other(reason)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
