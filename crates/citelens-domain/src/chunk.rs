//! Chunk module - sentence-aligned slices of a document

/// An ordered, word-bounded segment of document text
///
/// The first `overlap` entries of `sentences` were carried over from the
/// previous chunk so a citation straddling the boundary is seen whole by at
/// least one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the sequence (0-based)
    pub index: usize,

    /// Sentence units in document order
    pub sentences: Vec<String>,

    /// Number of leading sentences carried from the previous chunk
    pub overlap: usize,

    /// Total whitespace-separated words across `sentences`
    pub word_count: usize,

    /// Sealed text sent to the completion service
    pub text: String,
}

impl Chunk {
    /// Sentences first introduced by this chunk
    pub fn fresh_sentences(&self) -> &[String] {
        &self.sentences[self.overlap.min(self.sentences.len())..]
    }

    /// Sentences carried over from the previous chunk
    pub fn carried_sentences(&self) -> &[String] {
        &self.sentences[..self.overlap.min(self.sentences.len())]
    }
}
