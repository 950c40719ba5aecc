//! Lexicon-based polarity scoring for citing sentences

use citelens_domain::SentimentScorer;
use std::collections::HashMap;

const POSITIVE: &[(&str, f64)] = &[
    ("accurate", 0.5),
    ("advance", 0.4),
    ("beneficial", 0.6),
    ("best", 0.8),
    ("better", 0.5),
    ("clever", 0.6),
    ("comprehensive", 0.5),
    ("consistent", 0.3),
    ("effective", 0.6),
    ("efficient", 0.5),
    ("elegant", 0.6),
    ("excellent", 1.0),
    ("good", 0.7),
    ("great", 0.8),
    ("important", 0.4),
    ("improve", 0.5),
    ("improved", 0.5),
    ("improvement", 0.5),
    ("improves", 0.5),
    ("influential", 0.6),
    ("insightful", 0.7),
    ("novel", 0.5),
    ("outperform", 0.6),
    ("outperformed", 0.6),
    ("outperforms", 0.6),
    ("pioneering", 0.7),
    ("powerful", 0.6),
    ("promising", 0.6),
    ("reliable", 0.5),
    ("robust", 0.5),
    ("seminal", 0.7),
    ("significant", 0.4),
    ("strong", 0.5),
    ("success", 0.6),
    ("successful", 0.7),
    ("successfully", 0.6),
    ("superior", 0.7),
    ("useful", 0.5),
    ("valuable", 0.6),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("biased", -0.5),
    ("costly", -0.4),
    ("difficult", -0.3),
    ("drawback", -0.5),
    ("drawbacks", -0.5),
    ("error", -0.3),
    ("errors", -0.3),
    ("expensive", -0.3),
    ("fail", -0.6),
    ("failed", -0.6),
    ("fails", -0.7),
    ("failure", -0.6),
    ("flawed", -0.7),
    ("inaccurate", -0.6),
    ("incorrect", -0.6),
    ("inefficient", -0.5),
    ("insufficient", -0.5),
    ("lack", -0.4),
    ("lacks", -0.4),
    ("limitation", -0.4),
    ("limitations", -0.4),
    ("limited", -0.4),
    ("poor", -0.7),
    ("poorly", -0.6),
    ("problematic", -0.6),
    ("questionable", -0.5),
    ("suffer", -0.5),
    ("suffers", -0.5),
    ("unclear", -0.4),
    ("unreliable", -0.6),
    ("weak", -0.5),
    ("worse", -0.6),
    ("wrong", -0.6),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.8),
    ("highly", 1.5),
    ("particularly", 1.3),
    ("significantly", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("substantially", 1.4),
    ("very", 1.5),
];

const NEGATORS: &[&str] = &["cannot", "neither", "never", "no", "nor", "not", "without"];

/// Factor applied to a negated word
const NEGATION_FACTOR: f64 = -0.5;

/// Scores polarity by averaging lexicon hits over the words of a sentence
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Create a scorer with the built-in scholarly lexicon
    pub fn new() -> Self {
        let lexicon = POSITIVE
            .iter()
            .chain(NEGATIVE)
            .map(|(word, score)| (word.to_string(), *score))
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|(word, factor)| (word.to_string(), *factor))
            .collect();

        Self { lexicon, intensifiers }
    }

    /// Add or override a lexicon entry
    pub fn with_entry(mut self, word: impl Into<String>, score: f64) -> Self {
        self.lexicon.insert(word.into().to_lowercase(), score.clamp(-1.0, 1.0));
        self
    }
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let words = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty());

        let mut total = 0.0;
        let mut scored = 0usize;
        let mut scale = 1.0;
        let mut negated = false;

        for word in words {
            if is_negator(word) {
                negated = true;
            } else if let Some(factor) = self.intensifiers.get(word) {
                scale *= factor;
            } else if let Some(score) = self.lexicon.get(word) {
                let mut value = score * scale;
                if negated {
                    value *= NEGATION_FACTOR;
                }
                total += value;
                scored += 1;
                scale = 1.0;
                negated = false;
            }
        }

        if scored == 0 {
            return 0.0;
        }
        (total / scored as f64).clamp(-1.0, 1.0)
    }
}
