//! Citation records and reference match outcomes

use crate::citation::{Citation, Reference};
use crate::sentiment::Sentiment;

/// Display label used when a citation has no reference
pub const NO_MATCH_LABEL: &str = "No matching reference found";

/// How a citation was aligned to a bibliography entry
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceMatch {
    /// Taken directly from the reference list at the citation's position
    Positional {
        /// Offset into the reference list
        index: usize,
        /// The aligned reference
        reference: Reference,
    },

    /// Best content-similarity candidate above the acceptance threshold
    Similar {
        /// The closest reference
        reference: Reference,
        /// Similarity score in [0, 1]
        score: f64,
    },

    /// No reference could be confidently aligned
    NoMatch,
}

impl ReferenceMatch {
    /// The matched reference, if any
    pub fn reference(&self) -> Option<&Reference> {
        match self {
            ReferenceMatch::Positional { reference, .. } => Some(reference),
            ReferenceMatch::Similar { reference, .. } => Some(reference),
            ReferenceMatch::NoMatch => None,
        }
    }

    /// Whether a reference was assigned
    pub fn is_match(&self) -> bool {
        !matches!(self, ReferenceMatch::NoMatch)
    }

    /// Reference text, or the no-match label
    pub fn label(&self) -> &str {
        self.reference()
            .map(Reference::as_str)
            .unwrap_or(NO_MATCH_LABEL)
    }

    /// Short name of the matching strategy that produced this outcome
    pub fn strategy(&self) -> &'static str {
        match self {
            ReferenceMatch::Positional { .. } => "positional",
            ReferenceMatch::Similar { .. } => "similarity",
            ReferenceMatch::NoMatch => "none",
        }
    }
}

/// One analyzed citation
///
/// Records are immutable once produced by the assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationRecord {
    /// The citing sentence
    pub citation: Citation,

    /// Aligned bibliography entry
    pub reference: ReferenceMatch,

    /// Lookup link for the reference
    pub link: String,

    /// Sentiment of the citing sentence
    pub sentiment: Sentiment,
}
