//! Completion provider selected by configuration.

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::Result;
use citelens_domain::{CompletionRequest, CompletionService};
use citelens_llm::{ollama, LlmError, OllamaProvider, OpenAiProvider};
use tracing::info;

/// One of the supported completion providers.
pub enum Provider {
    /// OpenAI-compatible API
    OpenAi(OpenAiProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build the provider described by `config`.
    ///
    /// Fails when the OpenAI provider is selected and no API key is
    /// available from the environment or the config file.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let provider = match config.kind {
            ProviderKind::OpenAi => {
                let mut provider = OpenAiProvider::from_api_key(config.resolve_api_key(), &config.model)?
                    .with_max_retries(config.max_retries);
                if let Some(endpoint) = &config.endpoint {
                    provider = provider.with_endpoint(endpoint);
                }
                Provider::OpenAi(provider)
            }
            ProviderKind::Ollama => {
                let endpoint = config.endpoint.as_deref().unwrap_or(ollama::DEFAULT_ENDPOINT);
                Provider::Ollama(OllamaProvider::new(endpoint, &config.model)?.with_max_retries(config.max_retries))
            }
        };

        info!("Using {:?} provider with model {}", config.kind, provider.model_name());
        Ok(provider)
    }
}

impl CompletionService for Provider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, Self::Error> {
        match self {
            Provider::OpenAi(p) => p.complete(request),
            Provider::Ollama(p) => p.complete(request),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Provider::OpenAi(p) => p.model_name(),
            Provider::Ollama(p) => p.model_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_from_config() {
        let config = ProviderConfig {
            kind: ProviderKind::Ollama,
            model: "llama3".to_string(),
            ..Default::default()
        };
        let provider = Provider::from_config(&config).unwrap();
        assert!(matches!(provider, Provider::Ollama(_)));
        assert_eq!(provider.model_name(), "llama3");
    }

    #[test]
    fn test_openai_with_configured_key() {
        let config = ProviderConfig {
            api_key: Some("sk-test".to_string()),
            endpoint: Some("http://localhost:9999/v1".to_string()),
            ..Default::default()
        };
        let provider = Provider::from_config(&config).unwrap();
        assert!(matches!(provider, Provider::OpenAi(_)));
        assert_eq!(provider.model_name(), "gpt-3.5-turbo");
    }
}
