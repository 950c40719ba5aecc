//! OpenAI Provider Implementation
//!
//! Talks to any OpenAI-compatible chat-completions endpoint.
//!
//! # Examples
//!
//! ```no_run
//! use citelens_domain::{CompletionRequest, CompletionService};
//! use citelens_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env("gpt-3.5-turbo").unwrap();
//! let reply = provider
//!     .complete(&CompletionRequest::new("Say hello").with_max_tokens(10))
//!     .unwrap();
//! ```

use crate::http::{self, RetryPolicy};
use crate::LlmError;
use citelens_domain::{CompletionRequest, CompletionService};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default timeout for completion requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat-completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider with an explicit key
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if the key is empty.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential(API_KEY_ENV.to_string()));
        }

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            client: http::build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a provider from an optional key, failing if none is present
    pub fn from_api_key(api_key: Option<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        match api_key {
            Some(key) => Self::new(key, model),
            None => Err(LlmError::MissingCredential(API_KEY_ENV.to_string())),
        }
    }

    /// Create a provider reading the key from `OPENAI_API_KEY`
    pub fn from_env(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::from_api_key(std::env::var(API_KEY_ENV).ok(), model)
    }

    /// Point at a different OpenAI-compatible base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
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

fn parse_chat_response(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
}

impl CompletionService for OpenAiProvider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = format!("{}/chat/completions", self.endpoint);
        let raw = http::post_json(
            &self.client,
            &url,
            Some(&self.api_key),
            &body,
            &self.model,
            self.retry,
        )?;
        parse_chat_response(&raw)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
