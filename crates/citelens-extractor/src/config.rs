//! Configuration for the citation pipeline

use crate::link::{DEFAULT_FALLBACK_URL, DEFAULT_SEARCH_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for chunking, extraction, matching and the paper assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum words per chunk
    pub chunk_max_tokens: usize,

    /// Sentences carried from one chunk into the next
    pub chunk_overlap: usize,

    /// Output token limit for per-chunk citation requests
    pub citation_max_tokens: u32,

    /// Output token limit for the reference-section request
    pub reference_max_tokens: u32,

    /// Temperature for citation and reference requests
    pub extraction_temperature: f32,

    /// Maximum time for a single completion call (seconds)
    pub request_timeout_secs: u64,

    /// Chunk requests allowed in flight at once
    pub max_concurrent_requests: usize,

    /// Minimum similarity (exclusive) for a fallback reference match
    pub similarity_threshold: f64,

    /// Search endpoint used for reference lookup links
    pub search_endpoint: String,

    /// Link used when no reference matched
    pub fallback_url: String,

    /// Output token limit for summaries
    pub summary_max_tokens: u32,

    /// Temperature for summaries
    pub summary_temperature: f32,

    /// Output token limit for answers
    pub qa_max_tokens: u32,

    /// Temperature for answers
    pub qa_temperature: f32,

    /// Characters of the paper included with each question
    pub qa_context_chars: usize,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_max_tokens == 0 {
            return Err("chunk_max_tokens must be greater than 0".to_string());
        }
        if self.citation_max_tokens == 0 || self.reference_max_tokens == 0 {
            return Err("completion token limits must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(format!(
                "similarity_threshold {} out of range [0.0, 1.0]",
                self.similarity_threshold
            ));
        }
        for (name, t) in [
            ("extraction_temperature", self.extraction_temperature),
            ("summary_temperature", self.summary_temperature),
            ("qa_temperature", self.qa_temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("{} {} out of range [0.0, 2.0]", name, t));
            }
        }
        if self.search_endpoint.trim().is_empty() || self.fallback_url.trim().is_empty() {
            return Err("search_endpoint and fallback_url must be set".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_max_tokens: 3000,
            chunk_overlap: 50,
            citation_max_tokens: 300,
            reference_max_tokens: 500,
            extraction_temperature: 0.2,
            request_timeout_secs: 120,
            max_concurrent_requests: 1,
            similarity_threshold: 0.4,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            summary_max_tokens: 2000,
            summary_temperature: 0.6,
            qa_max_tokens: 2000,
            qa_temperature: 0.7,
            qa_context_chars: 5000,
        }
    }
}
