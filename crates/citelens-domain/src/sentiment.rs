//! Three-way sentiment label for citing sentences

use std::fmt;
use std::str::FromStr;

/// Sentiment of a citing sentence toward the cited work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    /// Polarity above zero
    Positive,

    /// Polarity below zero
    Negative,

    /// Polarity exactly zero (or undefined)
    Neutral,
}

impl Sentiment {
    /// All labels in display order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Map a polarity score onto a label
    ///
    /// # Examples
    ///
    /// ```
    /// use citelens_domain::Sentiment;
    ///
    /// assert_eq!(Sentiment::from_polarity(0.25), Sentiment::Positive);
    /// assert_eq!(Sentiment::from_polarity(-0.1), Sentiment::Negative);
    /// assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
    /// ```
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            // NaN falls through both comparisons
            Sentiment::Neutral
        }
    }

    /// Get the label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("Unknown sentiment: {}", other)),
        }
    }
}
