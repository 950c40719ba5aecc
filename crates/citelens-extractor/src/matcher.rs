//! Citation-to-reference alignment

use std::collections::HashMap;

use citelens_domain::{Citation, Reference, ReferenceMatch};
use tracing::debug;

/// Default minimum similarity (exclusive) for a content match
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.4;

/// Second sequences at least this long drop their popular characters from the index
const AUTOJUNK_MIN_LEN: usize = 200;

/// Case-insensitive similarity of two strings in [0, 1]
///
/// Ratcliff/Obershelp ratio `2 * M / (|a| + |b|)`, where `M` counts the
/// characters in the matching blocks found by recursively taking the longest
/// common run and then matching the text on either side of it. Two empty
/// strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * BlockMatcher::new(&a, &b).matched_len() as f64 / total as f64
}

/// Matching-block search over two character sequences
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    positions: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            positions.entry(*ch).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular = b.len() / 100 + 1;
            positions.retain(|_, js| js.len() <= popular);
        }

        Self { a, b, positions }
    }

    /// Total length of all matching blocks
    fn matched_len(&self) -> usize {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut matched = 0;

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Longest common run in `a[alo..ahi]` and `b[blo..bhi]`, earliest on ties
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best) = (alo, blo, 0);
        let mut runs: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next = HashMap::new();
            if let Some(js) = self.positions.get(&a[i]) {
                for &j in js {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|p| runs.get(&p)).copied().unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > best {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best = k;
                    }
                }
            }
            runs = next;
        }

        // Grow through characters the index skipped as popular
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best += 1;
        }
        while best_i + best < ahi && best_j + best < bhi && a[best_i + best] == b[best_j + best] {
            best += 1;
        }

        (best_i, best_j, best)
    }
}

/// Aligns each citation with one bibliography entry
///
/// Positional alignment wins whenever the citation's position is a valid
/// offset into the reference list. Otherwise the most similar reference is
/// used if it clears the threshold.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceMatcher {
    threshold: f64,
}

impl Default for ReferenceMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl ReferenceMatcher {
    /// Create a matcher with an exclusive acceptance threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The acceptance threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Match the citation found at `position` among extracted citations
    pub fn match_reference(
        &self,
        citation: &Citation,
        references: &[Reference],
        position: usize,
    ) -> ReferenceMatch {
        if let Some(reference) = references.get(position) {
            return ReferenceMatch::Positional {
                index: position,
                reference: reference.clone(),
            };
        }

        match best_candidate(citation, references) {
            Some((idx, score)) if score > self.threshold => {
                debug!("Citation {} matched reference {} by similarity {:.3}", position, idx, score);
                ReferenceMatch::Similar {
                    reference: references[idx].clone(),
                    score,
                }
            }
            _ => ReferenceMatch::NoMatch,
        }
    }
}

/// Index and score of the most similar reference; the first maximum wins
pub fn best_candidate(citation: &Citation, references: &[Reference]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, reference) in references.iter().enumerate() {
        let score = similarity(citation.as_str(), reference.as_str());
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(entries: &[&str]) -> Vec<Reference> {
        entries.iter().map(|e| Reference::new(*e)).collect()
    }

    #[test]
    fn test_positional_ignores_similarity() {
        let matcher = ReferenceMatcher::default();
        let references = refs(&["Completely unrelated entry", "Another one"]);
        let citation = Citation::new("Smith (2019) showed X.");

        let result = matcher.match_reference(&citation, &references, 1);
        assert_eq!(
            result,
            ReferenceMatch::Positional {
                index: 1,
                reference: Reference::new("Another one"),
            }
        );
    }

    #[test]
    fn test_similarity_fallback_beyond_list() {
        let matcher = ReferenceMatcher::default();
        let references = refs(&["Zhang, Q. Graph methods, 2015.", "Smith, J. Deep nets for X, 2019."]);
        let citation = Citation::new("smith 2019 showed deep nets for x");

        match matcher.match_reference(&citation, &references, 5) {
            ReferenceMatch::Similar { reference, score } => {
                assert_eq!(reference.as_str(), "Smith, J. Deep nets for X, 2019.");
                assert!(score > 0.4);
            }
            other => panic!("expected similarity match, got {:?}", other),
        }
    }

    #[test]
    fn test_below_threshold_is_no_match() {
        let matcher = ReferenceMatcher::default();
        let references = refs(&["qqqq"]);
        let citation = Citation::new("zzzzzzzz");

        assert_eq!(matcher.match_reference(&citation, &references, 3), ReferenceMatch::NoMatch);
    }

    #[test]
    fn test_threshold_is_strict() {
        let matcher = ReferenceMatcher::new(0.5);
        let references = refs(&["ax"]);
        let citation = Citation::new("ab");

        assert!((similarity("ab", "ax") - 0.5).abs() < 1e-9);
        assert_eq!(matcher.match_reference(&citation, &references, 1), ReferenceMatch::NoMatch);
    }

    #[test]
    fn test_first_maximum_wins() {
        let references = refs(&["ac", "bb"]);
        let citation = Citation::new("ab");

        let (idx, score) = best_candidate(&citation, &references).unwrap();
        assert_eq!(idx, 0);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_references_is_no_match() {
        let matcher = ReferenceMatcher::default();
        let citation = Citation::new("Smith (2019) showed X.");
        assert_eq!(matcher.match_reference(&citation, &[], 0), ReferenceMatch::NoMatch);
    }

    #[test]
    fn test_unrelated_reference_stays_below_threshold() {
        let matcher = ReferenceMatcher::default();
        let references = refs(&["Kingma, D. Adam: a method for stochastic optimization."]);
        let citation = Citation::new("Jones found that attention helps translation.");

        let score = similarity(citation.as_str(), references[0].as_str());
        assert!((score - 38.0 / 99.0).abs() < 1e-9);
        assert_eq!(matcher.match_reference(&citation, &references, 1), ReferenceMatch::NoMatch);
    }

    #[test]
    fn test_insufficient_references_without_similarity() {
        let matcher = ReferenceMatcher::default();
        let references = refs(&["No related entries"]);
        let citation = Citation::new("Smith 2020 found X");

        assert!(similarity(citation.as_str(), references[0].as_str()) <= 0.4);
        assert_eq!(matcher.match_reference(&citation, &references, 1), ReferenceMatch::NoMatch);
    }

    #[test]
    fn test_matching_blocks_not_subsequence() {
        // Longest common subsequence is "ab" but the blocks only match one character
        assert!((similarity("ab", "ba") - 0.5).abs() < 1e-9);
        assert!((similarity("abcd", "bcda") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_strings() {
        assert!((similarity("", "") - 1.0).abs() < 1e-9);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_long_reference_skips_popular_characters() {
        let reference = format!("{} tail", "e".repeat(210));
        // 'e' is popular in the reference, so the run found at " tail" grows left through one 'e'
        assert!((similarity("e tail", &reference) - 2.0 * 6.0 / (6.0 + 215.0)).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        assert!((similarity("Deep Learning", "deep learning") - 1.0).abs() < 1e-9);
    }
}
