//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during a single completion-backed step
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Completion provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Completion call exceeded the configured timeout
    #[error("Completion timeout after {0}s")]
    Timeout(u64),

    /// Blocking task failed to join
    #[error("Task join error: {0}")]
    Join(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
