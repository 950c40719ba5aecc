//! Ollama Provider Implementation
//!
//! Runs completions against a local Ollama instance, useful when papers
//! must not leave the machine.
//!
//! # Examples
//!
//! ```no_run
//! use citelens_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3").unwrap();
//! ```

use crate::http::{self, RetryPolicy};
use crate::LlmError;
use citelens_domain::{CompletionRequest, CompletionService};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for generation requests (120 seconds, local models are slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ollama API provider for local inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: http::build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    /// Set the first backoff delay (doubled on each retry)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry.base_delay = delay;
        self
    }
}

impl CompletionService for OllamaProvider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            system: request.system.as_deref(),
            stream: false,
            options: OllamaOptions {
                num_predict: request.max_tokens,
                temperature: request.temperature,
            },
        };

        let url = format!("{}/api/generate", self.endpoint);
        let raw = http::post_json(&self.client, &url, None, &body, &self.model, self.retry)?;

        let parsed: OllamaGenerateResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        Ok(parsed.response.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama3").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model_name(), "llama3");
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_ollama_provider_with_max_retries() {
        let provider = OllamaProvider::default_endpoint("llama3")
            .unwrap()
            .with_max_retries(5);
        assert_eq!(provider.retry.max_retries, 5);
    }

    #[test]
    fn test_request_omits_missing_system() {
        let body = OllamaGenerateRequest {
            model: "llama3",
            prompt: "p",
            system: None,
            stream: false,
            options: OllamaOptions {
                num_predict: 500,
                temperature: 0.2,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["options"]["num_predict"], 500);
    }

    #[test]
    fn test_ollama_error_handling() {
        // Use invalid endpoint to trigger error
        let provider = OllamaProvider::new("http://localhost:99999", "llama3")
            .unwrap()
            .with_max_retries(1);

        let result = provider.complete(&CompletionRequest::new("test"));
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[test]
    #[ignore] // Only run when Ollama is available
    fn test_ollama_complete_integration() {
        let provider = OllamaProvider::default_endpoint("llama3").unwrap();
        let reply = provider
            .complete(&CompletionRequest::new("Say 'hello' and nothing else"))
            .unwrap();
        assert!(!reply.is_empty());
    }
}
