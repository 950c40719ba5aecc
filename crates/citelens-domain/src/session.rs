//! Paper session - explicit per-document context
//!
//! Holds what a UI would otherwise keep in ambient session state: the
//! document text, the cached citation analysis and the Q&A transcript.
//! Callers own it and pass it into pipeline calls.

use crate::record::CitationRecord;
use std::fmt;

/// Unique identifier for a session based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The person asking questions
    User,
    /// The completion service
    Assistant,
}

impl ChatRole {
    /// Label used in transcripts
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        }
    }
}

/// One message in the Q&A transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Who said it
    pub role: ChatRole,
    /// What was said
    pub message: String,
}

/// Context for one uploaded paper
#[derive(Debug, Clone)]
pub struct PaperSession {
    /// Session identifier
    pub id: SessionId,

    /// Full extracted text of the paper
    pub document: String,

    /// Cached citation analysis, `None` until the paper is analyzed
    pub records: Option<Vec<CitationRecord>>,

    /// Q&A transcript in order
    pub chat: Vec<ChatTurn>,
}

impl PaperSession {
    /// Start a session for a document
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            document: document.into(),
            records: None,
            chat: Vec::new(),
        }
    }

    /// Whether citation analysis has already run
    pub fn is_analyzed(&self) -> bool {
        self.records.is_some()
    }

    /// Append a chat turn
    pub fn push_turn(&mut self, role: ChatRole, message: impl Into<String>) {
        self.chat.push(ChatTurn {
            role,
            message: message.into(),
        });
    }

    /// Render the transcript for export
    ///
    /// # Examples
    ///
    /// ```
    /// use citelens_domain::{ChatRole, PaperSession};
    ///
    /// let mut session = PaperSession::new("paper text");
    /// session.push_turn(ChatRole::User, "What is the method?");
    /// session.push_turn(ChatRole::Assistant, "A transformer.");
    /// assert_eq!(
    ///     session.transcript(),
    ///     "User: What is the method?\nAssistant: A transformer.\n"
    /// );
    /// ```
    pub fn transcript(&self) -> String {
        self.chat
            .iter()
            .map(|turn| format!("{}: {}\n", turn.role.label(), turn.message))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unanalyzed() {
        let session = PaperSession::new("text");
        assert!(!session.is_analyzed());
        assert!(session.chat.is_empty());
        assert_eq!(session.transcript(), "");
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = PaperSession::new("a");
        let b = PaperSession::new("b");
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.to_string().len(), 36);
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut session = PaperSession::new("text");
        session.push_turn(ChatRole::User, "q1");
        session.push_turn(ChatRole::Assistant, "a1");
        session.push_turn(ChatRole::User, "q2");
        assert_eq!(session.transcript(), "User: q1\nAssistant: a1\nUser: q2\n");
    }
}
