//! Citelens Extractor
//!
//! Finds citation sentences in a research paper, aligns each one with a
//! bibliography entry and labels its sentiment.
//!
//! # Architecture
//!
//! ```text
//! text → SentenceChunker → chunks → CitationExtractor ─┐
//! text → ReferenceExtractor ───────────────────────────┴→ ReferenceMatcher → records
//! ```
//!
//! The two extraction passes share no data and run concurrently. Each
//! completion request is a unit of work: a failed unit contributes nothing
//! and is reported next to the records instead of aborting the run.
//!
//! # Example Usage
//!
//! ```no_run
//! use citelens_extractor::{CitationAssembler, ExtractorConfig, LexiconScorer};
//! use citelens_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::new(""));
//! let assembler = CitationAssembler::new(provider, LexiconScorer::new(), ExtractorConfig::default())?;
//!
//! let report = assembler.assemble("Prior work showed X [1].").await;
//! for record in &report.records {
//!     println!("{} -> {} ({})", record.citation, record.reference.label(), record.sentiment);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assembler;
mod assistant;
mod chunking;
mod citations;
mod client;
mod config;
mod error;
mod link;
mod matcher;
mod ordered_set;
mod parser;
mod prompt;
mod references;
mod sentiment;
mod types;


pub use assembler::CitationAssembler;
pub use assistant::PaperAssistant;
pub use chunking::{SentenceChunker, SENTENCE_SEPARATOR};
pub use citations::CitationExtractor;
pub use client::CompletionClient;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use link::{encode_query, LinkBuilder, DEFAULT_FALLBACK_URL, DEFAULT_SEARCH_ENDPOINT};
pub use matcher::{best_candidate, similarity, ReferenceMatcher, DEFAULT_SIMILARITY_THRESHOLD};
pub use ordered_set::OrderedSet;
pub use parser::parse_lines;
pub use prompt::{
    CITATION_INSTRUCTION, QUESTION_INSTRUCTION, REFERENCE_INSTRUCTION, SUMMARY_INSTRUCTION,
};
pub use references::ReferenceExtractor;
pub use sentiment::LexiconScorer;
pub use types::{AssemblyMetadata, AssemblyReport, ExtractionUnit, PassOutcome, UnitFailure};
