//! Sentence-aligned chunking for long documents

use citelens_domain::Chunk;

/// Boundary between sentence units
pub const SENTENCE_SEPARATOR: &str = ". ";

/// Splits text into overlapping, word-bounded chunks
///
/// Sentences are accumulated until the next one would push the chunk past
/// `max_tokens` words. The sealed chunk's last `overlap` sentences seed the
/// next chunk. A sentence that is larger than the budget on its own is kept
/// whole as a chunk of its own.
#[derive(Debug, Clone, Copy)]
pub struct SentenceChunker {
    max_tokens: usize,
    overlap: usize,
}

impl SentenceChunker {
    /// Create a new chunker
    pub fn new(max_tokens: usize, overlap: usize) -> Self {
        Self {
            max_tokens: max_tokens.max(1),
            overlap,
        }
    }

    /// Split `text` into chunks
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_tokens = 0;
        let mut carried = 0;

        for sentence in text.split(SENTENCE_SEPARATOR) {
            if sentence.trim().is_empty() {
                continue;
            }
            let tokens = word_count(sentence);

            if !current.is_empty() && current_tokens + tokens > self.max_tokens {
                chunks.push(seal(chunks.len(), &current, carried));

                // Shrink the carry from its oldest end until the incoming sentence fits
                let mut keep = self.overlap.min(current.len());
                while keep > 0 && total_words(&current[current.len() - keep..]) + tokens > self.max_tokens {
                    keep -= 1;
                }

                current = current.split_off(current.len() - keep);
                carried = keep;
                current_tokens = total_words(&current);
            }

            current.push(sentence);
            current_tokens += tokens;
        }

        if !current.is_empty() {
            chunks.push(seal(chunks.len(), &current, carried));
        }

        chunks
    }
}

fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

fn total_words(sentences: &[&str]) -> usize {
    sentences.iter().map(|s| word_count(s)).sum()
}

fn seal(index: usize, sentences: &[&str], carried: usize) -> Chunk {
    let mut text = sentences.join(SENTENCE_SEPARATOR);
    if !text.trim_end().ends_with(['.', '!', '?']) {
        text.push('.');
    }

    Chunk {
        index,
        sentences: sentences.iter().map(|s| s.to_string()).collect(),
        overlap: carried,
        word_count: total_words(sentences),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_is_single_chunk() {
        let chunker = SentenceChunker::new(100, 2);
        let chunks = chunker.split("First sentence here. Second sentence here.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].overlap, 0);
        assert_eq!(chunks[0].text, "First sentence here. Second sentence here.");
        assert_eq!(chunks[0].word_count, 6);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let chunker = SentenceChunker::new(100, 2);
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n ").is_empty());
    }

    #[test]
    fn test_splits_at_budget_with_overlap() {
        let chunker = SentenceChunker::new(6, 1);
        let chunks = chunker.split("a b c. d e f. g h i. j k l");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].sentences, vec!["a b c", "d e f"]);
        assert_eq!(chunks[1].sentences, vec!["d e f", "g h i"]);
        assert_eq!(chunks[1].overlap, 1);
        assert_eq!(chunks[2].sentences, vec!["g h i", "j k l"]);
        assert_eq!(chunks[2].text, "g h i. j k l.");
    }

    #[test]
    fn test_zero_overlap_carries_nothing() {
        let chunker = SentenceChunker::new(3, 0);
        let chunks = chunker.split("a b c. d e f. g h i");
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert_eq!(chunk.overlap, 0);
            assert_eq!(chunk.sentences.len(), 1);
        }
    }

    #[test]
    fn test_oversized_sentence_kept_whole() {
        let chunker = SentenceChunker::new(3, 1);
        let long = "one two three four five six seven";
        let text = format!("a b. {}. c d", long);
        let chunks = chunker.split(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].sentences, vec!["a b"]);
        assert_eq!(chunks[1].sentences, vec![long]);
        assert_eq!(chunks[1].overlap, 0);
        assert_eq!(chunks[1].word_count, 7);
        assert_eq!(chunks[2].sentences, vec!["c d"]);
    }

    #[test]
    fn test_overlap_shrinks_to_fit_budget() {
        let chunker = SentenceChunker::new(5, 2);
        let chunks = chunker.split("a b. c d. e f g h");
        // Carrying "a b" and "c d" with a 4-word sentence would exceed 5 words
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].overlap, 0);
        assert_eq!(chunks[1].sentences, vec!["e f g h"]);
    }

    #[test]
    fn test_overlap_shrinks_from_oldest_sentence() {
        let chunker = SentenceChunker::new(5, 2);
        let chunks = chunker.split("a b. c d. e f g");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].sentences, vec!["a b", "c d"]);
        assert_eq!(chunks[1].overlap, 1);
        assert_eq!(chunks[1].carried_sentences(), vec!["c d".to_string()].as_slice());
        assert_eq!(chunks[1].sentences, vec!["c d", "e f g"]);
        assert_eq!(chunks[1].word_count, 5);
    }

    #[test]
    fn test_no_double_terminator() {
        let chunker = SentenceChunker::new(100, 0);
        let chunks = chunker.split("Prior work showed X. It works!");
        assert_eq!(chunks[0].text, "Prior work showed X. It works!");
    }

    #[test]
    fn test_chunk_indices_are_sequential() {
        let chunker = SentenceChunker::new(2, 0);
        let chunks = chunker.split("a b. c d. e f. g h");
        let indices: Vec<_> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sentence() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,6}", 1..=5).prop_map(|words| words.join(" "))
    }

    fn document() -> impl Strategy<Value = String> {
        prop::collection::vec(sentence(), 0..60).prop_map(|s| s.join(SENTENCE_SEPARATOR))
    }

    proptest! {
        /// Property: fresh sentences across all chunks reconstruct the document
        #[test]
        fn test_fresh_sentences_reconstruct_document(
            text in document(),
            max_tokens in 1usize..40,
            overlap in 0usize..5,
        ) {
            let chunks = SentenceChunker::new(max_tokens, overlap).split(&text);
            let rebuilt: Vec<String> = chunks
                .iter()
                .flat_map(|c| c.fresh_sentences().to_vec())
                .collect();
            let expected: Vec<String> = text
                .split(SENTENCE_SEPARATOR)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect();
            prop_assert_eq!(rebuilt, expected);
        }

        /// Property: only single-sentence chunks may exceed the word budget
        #[test]
        fn test_chunks_respect_budget(
            text in document(),
            max_tokens in 1usize..40,
            overlap in 0usize..5,
        ) {
            for chunk in SentenceChunker::new(max_tokens, overlap).split(&text) {
                prop_assert!(chunk.word_count <= max_tokens || chunk.sentences.len() == 1);
                prop_assert!(!chunk.fresh_sentences().is_empty());
            }
        }

        /// Property: leading sentences of chunk k+1 repeat the tail of chunk k
        ///
        /// Sentences hold at most 5 words and `max_tokens >= 25`, so the full
        /// carry plus the incoming sentence always fits and the carry never shrinks.
        #[test]
        fn test_overlap_repeats_previous_tail(
            text in document(),
            overlap in 0usize..4,
            max_tokens in 25usize..60,
        ) {
            let chunks = SentenceChunker::new(max_tokens, overlap).split(&text);
            for pair in chunks.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                prop_assert!(prev.sentences.len() >= overlap);
                prop_assert_eq!(next.overlap, overlap);
                let tail = &prev.sentences[prev.sentences.len() - overlap..];
                prop_assert_eq!(next.carried_sentences(), tail);
            }
        }

        /// Property: under any budget the carry is a suffix of the previous chunk,
        /// at most `overlap` long
        #[test]
        fn test_shrunk_carry_is_previous_tail(
            text in document(),
            overlap in 0usize..5,
            max_tokens in 1usize..12,
        ) {
            let chunks = SentenceChunker::new(max_tokens, overlap).split(&text);
            for pair in chunks.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                prop_assert!(next.overlap <= overlap);
                let tail = &prev.sentences[prev.sentences.len() - next.overlap..];
                prop_assert_eq!(next.carried_sentences(), tail);
            }
        }
    }
}
