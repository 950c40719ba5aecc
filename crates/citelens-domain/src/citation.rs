//! Citation and reference text units

use std::fmt;

/// A sentence believed to reference external work
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Citation(String);

impl Citation {
    /// Wrap a citation sentence
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the sentence text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned sentence
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A single bibliography entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference(String);

impl Reference {
    /// Wrap a bibliography entry
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the entry text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned entry
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! impl_text_unit {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $ty {
            fn from(text: String) -> Self {
                Self(text)
            }
        }

        impl From<&str> for $ty {
            fn from(text: &str) -> Self {
                Self(text.to_string())
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_text_unit!(Citation);
impl_text_unit!(Reference);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_display_is_verbatim() {
        let citation = Citation::new("Prior work showed X.");
        assert_eq!(citation.to_string(), "Prior work showed X.");
        assert_eq!(citation.as_str(), "Prior work showed X.");
    }

    #[test]
    fn test_reference_conversions() {
        let a: Reference = "A. Author, Paper, 2020.".into();
        let b = Reference::from("A. Author, Paper, 2020.".to_string());
        assert_eq!(a, b);
        assert_eq!(a.into_inner(), "A. Author, Paper, 2020.");
    }

    #[test]
    fn test_equality_is_exact() {
        assert_ne!(Citation::new("Smith 2020"), Citation::new("smith 2020"));
        assert_ne!(Citation::new("Smith 2020"), Citation::new("Smith 2020 "));
    }
}
