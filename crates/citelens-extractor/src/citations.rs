//! Per-chunk citation extraction with first-seen deduplication

use crate::client::CompletionClient;
use crate::ordered_set::OrderedSet;
use crate::parser::parse_lines;
use crate::prompt::{PromptBuilder, PromptKind};
use crate::types::{ExtractionUnit, PassOutcome, UnitFailure};
use citelens_domain::{Chunk, Citation, CompletionRequest, CompletionService};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Collects citation sentences from every chunk of a document
pub struct CitationExtractor<L> {
    client: CompletionClient<L>,
    max_tokens: u32,
    temperature: f32,
    max_concurrent: usize,
}

impl<L> CitationExtractor<L>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new citation extractor
    pub fn new(client: CompletionClient<L>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            client,
            max_tokens,
            temperature,
            max_concurrent: 1,
        }
    }

    /// Allow up to `limit` chunk requests in flight at once
    pub fn with_max_concurrent(mut self, limit: usize) -> Self {
        self.max_concurrent = limit.max(1);
        self
    }

    /// Extract deduplicated citations in chunk order
    ///
    /// Failed chunks are skipped and reported; the rest still contribute.
    pub async fn extract(&self, chunks: &[Chunk]) -> PassOutcome<Citation> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let request = CompletionRequest::new(PromptBuilder::new(PromptKind::Citations, &chunk.text).build())
                .with_max_tokens(self.max_tokens)
                .with_temperature(self.temperature);

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                client.complete(request).await
            });
            handles.push((chunk.index, handle));
        }

        // Handles are awaited in chunk order, so completion order never leaks
        let mut citations = OrderedSet::new();
        let mut failures = Vec::new();
        let mut raw_count = 0;

        for (index, handle) in handles {
            let result = match handle.await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(e) => Err(format!("Task join error: {}", e)),
            };

            match result {
                Ok(response) => {
                    let lines = parse_lines(&response);
                    debug!("Chunk {} yielded {} citation lines", index, lines.len());
                    raw_count += lines.len();
                    for line in lines {
                        citations.insert(Citation::new(line));
                    }
                }
                Err(reason) => {
                    warn!("Citation extraction failed for chunk {}: {}", index, reason);
                    failures.push(UnitFailure {
                        unit: ExtractionUnit::Chunk(index),
                        reason,
                    });
                }
            }
        }

        info!(
            "Extracted {} citations ({} before deduplication) from {} chunks",
            citations.len(),
            raw_count,
            chunks.len()
        );

        PassOutcome {
            items: citations.into_vec(),
            failures,
            raw_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::SentenceChunker;
    use citelens_llm::MockProvider;
    use std::time::Duration;

    fn extractor(provider: MockProvider, concurrency: usize) -> CitationExtractor<MockProvider> {
        let client = CompletionClient::new(Arc::new(provider), Duration::from_secs(5));
        CitationExtractor::new(client, 300, 0.2).with_max_concurrent(concurrency)
    }

    fn chunks(text: &str) -> Vec<Chunk> {
        SentenceChunker::new(3, 0).split(text)
    }

    #[tokio::test]
    async fn test_deduplicates_across_chunks() {
        let mut provider = MockProvider::default();
        provider.add_response("alpha one", "Smith (2019) showed A.\nJones (2020) showed B.");
        provider.add_response("beta two", "Jones (2020) showed B.\nLee (2021) showed C.");

        let outcome = extractor(provider, 1)
            .extract(&chunks("alpha one x. beta two y"))
            .await;

        assert!(outcome.is_clean());
        assert_eq!(outcome.raw_count, 4);
        assert_eq!(
            outcome.items,
            vec![
                Citation::new("Smith (2019) showed A."),
                Citation::new("Jones (2020) showed B."),
                Citation::new("Lee (2021) showed C."),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_chunk_is_skipped() {
        let mut provider = MockProvider::default();
        provider.add_response("alpha one", "First citation.");
        provider.add_error("beta two");
        provider.add_response("gamma three", "Third citation.");

        let outcome = extractor(provider, 1)
            .extract(&chunks("alpha one x. beta two y. gamma three z"))
            .await;

        assert_eq!(
            outcome.items,
            vec![Citation::new("First citation."), Citation::new("Third citation.")]
        );
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].unit, ExtractionUnit::Chunk(1));
    }

    #[tokio::test]
    async fn test_one_request_per_chunk() {
        let provider = MockProvider::new("");
        let observer = provider.clone();

        let outcome = extractor(provider, 2)
            .extract(&chunks("a b c. d e f. g h i. j k l"))
            .await;

        assert!(outcome.items.is_empty());
        assert_eq!(observer.call_count(), 4);
        assert!(observer.requests().iter().all(|r| r.max_tokens == 300));
    }

    #[tokio::test]
    async fn test_no_chunks_no_requests() {
        let provider = MockProvider::new("unused");
        let observer = provider.clone();

        let outcome = extractor(provider, 1).extract(&[]).await;
        assert!(outcome.items.is_empty());
        assert_eq!(observer.call_count(), 0);
    }
}
