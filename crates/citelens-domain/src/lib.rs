//! Citelens Domain Layer
//!
//! Core value types and collaborator traits for citation analysis.
//! This crate carries no infrastructure: the completion service, sentiment
//! scorer and PDF reader all live behind traits or in other crates.
//!
//! ## Key Concepts
//!
//! - **Citation**: a sentence in a paper believed to reference external work
//! - **Reference**: a single bibliography entry
//! - **Chunk**: a sentence-aligned, word-bounded slice of a document
//! - **ReferenceMatch**: how (or whether) a citation was aligned to a reference
//! - **CitationRecord**: the output unit handed to callers
//! - **PaperSession**: explicit per-paper context (cached records, chat turns)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod citation;
pub mod filter;
pub mod record;
pub mod sentiment;
pub mod session;
pub mod traits;

// Re-exports for convenience
pub use chunk::Chunk;
pub use citation::{Citation, Reference};
pub use filter::{RecordFilter, SentimentBreakdown};
pub use record::{CitationRecord, ReferenceMatch, NO_MATCH_LABEL};
pub use sentiment::Sentiment;
pub use session::{ChatRole, ChatTurn, PaperSession, SessionId};
pub use traits::{CompletionRequest, CompletionService, SentimentScorer};
