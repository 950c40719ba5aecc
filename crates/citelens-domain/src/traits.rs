//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the citation pipeline and
//! infrastructure. Implementations live in other crates.

/// A single request to a text-completion service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Optional system instruction
    pub system: Option<String>,

    /// User prompt
    pub prompt: String,

    /// Maximum output length in tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a request with default limits (256 tokens, temperature 0.2)
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            max_tokens: 256,
            temperature: 0.2,
        }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the output token limit
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for text-completion providers
///
/// Implemented by the infrastructure layer (citelens-llm). Calls block until
/// the service answers or fails.
pub trait CompletionService {
    /// Error type for completion operations
    type Error;

    /// Complete a prompt
    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;

    /// Name of the model answering requests
    fn model_name(&self) -> &str;
}

/// Trait for sentence polarity scoring
pub trait SentimentScorer {
    /// Polarity of `text` in [-1.0, 1.0]
    fn polarity(&self, text: &str) -> f64;
}
