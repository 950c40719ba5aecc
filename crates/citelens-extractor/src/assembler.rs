//! Citation metadata assembly
//!
//! Runs the reference and citation passes over a document and joins their
//! results into one record per distinct citation.

use crate::chunking::SentenceChunker;
use crate::citations::CitationExtractor;
use crate::client::CompletionClient;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::link::LinkBuilder;
use crate::matcher::ReferenceMatcher;
use crate::references::ReferenceExtractor;
use crate::types::{AssemblyMetadata, AssemblyReport, UnitFailure};
use citelens_domain::{
    CitationRecord, CompletionService, PaperSession, Sentiment, SentimentScorer,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Produces citation records for a document
pub struct CitationAssembler<L, S> {
    chunker: SentenceChunker,
    references: ReferenceExtractor<L>,
    citations: CitationExtractor<L>,
    matcher: ReferenceMatcher,
    links: LinkBuilder,
    scorer: S,
    model_name: String,
}

impl<L, S> CitationAssembler<L, S>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
    S: SentimentScorer,
{
    /// Create a new assembler
    pub fn new(provider: Arc<L>, scorer: S, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let model_name = provider.model_name().to_string();
        let client = CompletionClient::new(provider, config.request_timeout());

        Ok(Self {
            chunker: SentenceChunker::new(config.chunk_max_tokens, config.chunk_overlap),
            references: ReferenceExtractor::new(
                client.clone(),
                config.reference_max_tokens,
                config.extraction_temperature,
            ),
            citations: CitationExtractor::new(
                client,
                config.citation_max_tokens,
                config.extraction_temperature,
            )
            .with_max_concurrent(config.max_concurrent_requests),
            matcher: ReferenceMatcher::new(config.similarity_threshold),
            links: LinkBuilder::new(config.search_endpoint, config.fallback_url),
            scorer,
            model_name,
        })
    }

    /// Assemble citation records for a document
    ///
    /// Never fails as a whole: units whose requests failed are listed in the
    /// report and the remaining output is still returned.
    pub async fn assemble(&self, text: &str) -> AssemblyReport {
        let start = Instant::now();

        if text.trim().is_empty() {
            info!("Document is empty, nothing to assemble");
            return self.report(Vec::new(), Vec::new(), 0, 0, 0, start);
        }

        let chunks = self.chunker.split(text);
        info!("Assembling citations: {} chars in {} chunks", text.len(), chunks.len());

        // The two passes share no data
        let (references, citations) = tokio::join!(
            self.references.extract(text),
            self.citations.extract(&chunks)
        );

        let records: Vec<CitationRecord> = citations
            .items
            .into_iter()
            .enumerate()
            .map(|(position, citation)| {
                let sentiment = Sentiment::from_polarity(self.scorer.polarity(citation.as_str()));
                let reference = self.matcher.match_reference(&citation, &references.items, position);
                let link = self.links.link_for(&reference);
                CitationRecord {
                    citation,
                    reference,
                    link,
                    sentiment,
                }
            })
            .collect();

        let matched = records.iter().filter(|r| r.reference.is_match()).count();
        let mut failures = references.failures;
        failures.extend(citations.failures);

        if !failures.is_empty() {
            warn!("{} extraction units failed and were skipped", failures.len());
        }
        info!(
            "Assembled {} records ({} matched to references)",
            records.len(),
            matched
        );

        self.report(
            records,
            failures,
            chunks.len(),
            citations.raw_count,
            references.raw_count,
            start,
        )
    }

    /// Analyze a paper session, caching its records
    ///
    /// Returns `None` without issuing any request when the session already
    /// holds records. A run where every unit failed is not cached.
    pub async fn analyze(&self, session: &mut PaperSession) -> Option<AssemblyReport> {
        if session.is_analyzed() {
            return None;
        }

        let report = self.assemble(&session.document).await;
        if report.records.is_empty() && !report.failures.is_empty() {
            warn!("Session {} not cached: extraction produced only failures", session.id);
        } else {
            session.records = Some(report.records.clone());
        }

        Some(report)
    }

    fn report(
        &self,
        records: Vec<CitationRecord>,
        failures: Vec<UnitFailure>,
        chunk_count: usize,
        citations_extracted: usize,
        references_extracted: usize,
        start: Instant,
    ) -> AssemblyReport {
        AssemblyReport {
            records,
            failures,
            metadata: AssemblyMetadata {
                chunk_count,
                citations_extracted,
                references_extracted,
                model_name: self.model_name.clone(),
                processing_time_ms: start.elapsed().as_millis() as u64,
            },
        }
    }
}
