//! Reference-section extraction

use crate::client::CompletionClient;
use crate::parser::parse_lines;
use crate::prompt::{PromptBuilder, PromptKind};
use crate::types::{ExtractionUnit, PassOutcome};
use citelens_domain::{CompletionRequest, CompletionService, Reference};
use tracing::{debug, info, warn};

/// Isolates the bibliography of a document with a single completion request
pub struct ReferenceExtractor<L> {
    client: CompletionClient<L>,
    max_tokens: u32,
    temperature: f32,
}

impl<L> ReferenceExtractor<L>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new reference extractor
    pub fn new(client: CompletionClient<L>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            client,
            max_tokens,
            temperature,
        }
    }

    /// Extract reference entries in the order the model lists them
    ///
    /// A failed request is not fatal: the outcome carries the failure and no
    /// references, so every citation later degrades to "no match".
    pub async fn extract(&self, text: &str) -> PassOutcome<Reference> {
        let request = CompletionRequest::new(PromptBuilder::new(PromptKind::References, text).build())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        match self.client.complete(request).await {
            Ok(response) => {
                debug!("Reference response length: {} chars", response.len());
                let references: Vec<Reference> =
                    parse_lines(&response).into_iter().map(Reference::new).collect();
                info!("Extracted {} references", references.len());
                let count = references.len();
                PassOutcome::complete(references, count)
            }
            Err(e) => {
                warn!("Reference extraction failed: {}", e);
                PassOutcome::failed(ExtractionUnit::References, e.to_string())
            }
        }
    }
}
