//! Lookup links for matched references

use citelens_domain::ReferenceMatch;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Default search endpoint for reference lookups
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://scholar.google.com/scholar";

/// Default link when no reference matched
pub const DEFAULT_FALLBACK_URL: &str = "https://scholar.google.com";

/// Builds search links from reference text without touching the network
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    search_endpoint: String,
    fallback_url: String,
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_ENDPOINT, DEFAULT_FALLBACK_URL)
    }
}

impl LinkBuilder {
    /// Create a link builder
    pub fn new(search_endpoint: impl Into<String>, fallback_url: impl Into<String>) -> Self {
        Self {
            search_endpoint: search_endpoint.into(),
            fallback_url: fallback_url.into(),
        }
    }

    /// Link for a match outcome; the fallback URL when nothing matched
    pub fn link_for(&self, matched: &ReferenceMatch) -> String {
        match matched.reference() {
            Some(reference) => format!("{}?q={}", self.search_endpoint, encode_query(reference.as_str())),
            None => self.fallback_url.clone(),
        }
    }
}

/// Bytes escaped inside a query value; non-ASCII bytes are always escaped
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b'&')
    .add(b'#')
    .add(b'%')
    .add(b'+')
    .add(b'=')
    .add(b'?');

/// Encode text as a query value: whitespace runs become `+`
///
/// Only characters that would break the query string are percent-encoded.
pub fn encode_query(text: &str) -> String {
    text.split_whitespace()
        .map(|word| utf8_percent_encode(word, QUERY_VALUE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}
