//! Outcome and report types for extraction passes

use citelens_domain::CitationRecord;
use std::fmt;

/// The unit of work a completion request covered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionUnit {
    /// The reference-section pass
    References,
    /// The citation pass over one chunk (by chunk index)
    Chunk(usize),
}

impl fmt::Display for ExtractionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionUnit::References => write!(f, "references"),
            ExtractionUnit::Chunk(idx) => write!(f, "chunk {}", idx),
        }
    }
}

/// A unit whose completion request failed and contributed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// Which unit failed
    pub unit: ExtractionUnit,
    /// Why it failed
    pub reason: String,
}

/// Items produced by one extraction pass plus the units that failed
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome<T> {
    /// Extracted items, in order
    pub items: Vec<T>,

    /// Units whose requests failed
    pub failures: Vec<UnitFailure>,

    /// Items parsed before deduplication
    pub raw_count: usize,
}

impl<T> PassOutcome<T> {
    /// Successful pass
    pub fn complete(items: Vec<T>, raw_count: usize) -> Self {
        Self {
            items,
            failures: Vec::new(),
            raw_count,
        }
    }

    /// Pass where the whole unit failed
    pub fn failed(unit: ExtractionUnit, reason: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            failures: vec![UnitFailure {
                unit,
                reason: reason.into(),
            }],
            raw_count: 0,
        }
    }

    /// Whether every unit succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of assembling citation records for one document
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyReport {
    /// One record per distinct citation, in first-seen order
    pub records: Vec<CitationRecord>,

    /// Units that failed and were skipped
    pub failures: Vec<UnitFailure>,

    /// Metadata about the run
    pub metadata: AssemblyMetadata,
}

/// Metadata about an assembly run
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyMetadata {
    /// Chunks sent for citation extraction
    pub chunk_count: usize,

    /// Citation lines returned before deduplication
    pub citations_extracted: usize,

    /// Reference entries returned
    pub references_extracted: usize,

    /// Name of the completion model used
    pub model_name: String,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
