//! Filtering and aggregation over citation records

use crate::record::CitationRecord;
use crate::sentiment::Sentiment;

/// Selects records by sentiment and free-text search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Keep only records with this sentiment
    pub sentiment: Option<Sentiment>,

    /// Keep only records whose citation contains this text (case-insensitive)
    pub query: Option<String>,
}

impl RecordFilter {
    /// Filter that keeps everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one sentiment
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Restrict to citations containing `query`
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Whether a single record passes
    pub fn matches(&self, record: &CitationRecord) -> bool {
        if let Some(sentiment) = self.sentiment {
            if record.sentiment != sentiment {
                return false;
            }
        }

        match &self.query {
            Some(query) => record
                .citation
                .as_str()
                .to_lowercase()
                .contains(&query.to_lowercase()),
            None => true,
        }
    }

    /// Apply to a record slice, preserving order
    pub fn apply<'a>(&self, records: &'a [CitationRecord]) -> Vec<&'a CitationRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Count of records per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentBreakdown {
    /// Positive records
    pub positive: usize,
    /// Negative records
    pub negative: usize,
    /// Neutral records
    pub neutral: usize,
}

impl SentimentBreakdown {
    /// Tally a sequence of records
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CitationRecord>,
    {
        let mut breakdown = Self::default();
        for record in records {
            match record.sentiment {
                Sentiment::Positive => breakdown.positive += 1,
                Sentiment::Negative => breakdown.negative += 1,
                Sentiment::Neutral => breakdown.neutral += 1,
            }
        }
        breakdown
    }

    /// Count for a single label
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    /// Total records counted
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::citation::Citation;
    use crate::record::ReferenceMatch;
    use proptest::prelude::*;

    fn records_from(polarities: &[f64]) -> Vec<CitationRecord> {
        polarities
            .iter()
            .enumerate()
            .map(|(i, p)| CitationRecord {
                citation: Citation::new(format!("citation {}", i)),
                reference: ReferenceMatch::NoMatch,
                link: String::new(),
                sentiment: Sentiment::from_polarity(*p),
            })
            .collect()
    }

    proptest! {
        /// Property: per-sentiment filters partition the record set
        #[test]
        fn test_sentiment_filters_partition(polarities in prop::collection::vec(-1.0f64..1.0, 0..40)) {
            let records = records_from(&polarities);
            let total: usize = Sentiment::ALL
                .iter()
                .map(|s| RecordFilter::all().with_sentiment(*s).apply(&records).len())
                .sum();
            prop_assert_eq!(total, records.len());
        }

        /// Property: breakdown counts agree with filtering
        #[test]
        fn test_breakdown_matches_filter(polarities in prop::collection::vec(-1.0f64..1.0, 0..40)) {
            let records = records_from(&polarities);
            let breakdown = SentimentBreakdown::from_records(&records);
            for sentiment in Sentiment::ALL {
                let filtered = RecordFilter::all().with_sentiment(sentiment).apply(&records);
                prop_assert_eq!(breakdown.count(sentiment), filtered.len());
            }
        }
    }
}
