//! Shared request/retry loop for HTTP providers

use crate::LlmError;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Retry behaviour for one provider
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_secs(1),
        }
    }
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

/// POST a JSON body and return the raw response text
///
/// Transient failures (transport errors, 429, 5xx) are retried with
/// exponential backoff; everything else is returned immediately.
pub(crate) fn post_json<T>(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    body: &T,
    model: &str,
    policy: RetryPolicy,
) -> Result<String, LlmError>
where
    T: Serialize + ?Sized,
{
    let max_attempts = policy.max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_attempts {
        let mut builder = client.post(url).json(body);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        match builder.send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response.text().map_err(|e| {
                        LlmError::InvalidResponse(format!("Failed to read response body: {}", e))
                    });
                }

                let error_text = response
                    .text()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let error = classify_status(status, &error_text, model);
                if !error.is_transient() {
                    return Err(error);
                }
                warn!("Attempt {}/{} to {} failed: {}", attempts + 1, max_attempts, url, error);
                last_error = Some(error);
            }
            Err(e) => {
                warn!("Attempt {}/{} to {} failed: {}", attempts + 1, max_attempts, url, e);
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_attempts {
            // Exponential backoff: 1x, 2x, 4x the base delay
            let delay = policy.base_delay * 2u32.pow(attempts - 1);
            debug!("Retrying in {:?}", delay);
            std::thread::sleep(delay);
        }
    }

    Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}

pub(crate) fn classify_status(status: StatusCode, body: &str, model: &str) -> LlmError {
    match status {
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        s if s.is_server_error() => LlmError::Communication(format!("HTTP {}: {}", status, body)),
        _ => LlmError::Other(format!("HTTP {}: {}", status, body)),
    }
}
