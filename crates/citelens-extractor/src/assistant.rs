//! Summaries and question answering over a paper

use crate::client::CompletionClient;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::prompt::{question_prompt, PromptBuilder, PromptKind, ASSISTANT_SYSTEM, SUMMARY_SYSTEM};
use citelens_domain::{ChatRole, CompletionRequest, CompletionService, PaperSession};
use std::sync::Arc;
use tracing::{debug, info};

/// Answers questions about a paper and summarizes it
pub struct PaperAssistant<L> {
    client: CompletionClient<L>,
    config: ExtractorConfig,
}

impl<L> PaperAssistant<L>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new assistant
    pub fn new(provider: Arc<L>, config: ExtractorConfig) -> Self {
        let client = CompletionClient::new(provider, config.request_timeout());
        Self { client, config }
    }

    /// Summarize a paper
    pub async fn summarize(&self, text: &str) -> Result<String, ExtractorError> {
        info!("Summarizing paper ({} chars)", text.len());
        let request = CompletionRequest::new(PromptBuilder::new(PromptKind::Summary, text).build())
            .with_system(SUMMARY_SYSTEM)
            .with_max_tokens(self.config.summary_max_tokens)
            .with_temperature(self.config.summary_temperature);

        self.client.complete(request).await
    }

    /// Ask a question about the session's paper
    ///
    /// Only the leading `qa_context_chars` characters of the paper are sent.
    /// The question is always recorded in the transcript; the answer only
    /// when the request succeeds.
    pub async fn ask(&self, session: &mut PaperSession, question: &str) -> Result<String, ExtractorError> {
        let question = question.trim();
        session.push_turn(ChatRole::User, question);

        let excerpt = leading_chars(&session.document, self.config.qa_context_chars);
        debug!(
            "Question over {} of {} chars of session {}",
            excerpt.len(),
            session.document.len(),
            session.id
        );

        let request = CompletionRequest::new(question_prompt(excerpt, question))
            .with_system(ASSISTANT_SYSTEM)
            .with_max_tokens(self.config.qa_max_tokens)
            .with_temperature(self.config.qa_temperature);

        let answer = self.client.complete(request).await?;
        session.push_turn(ChatRole::Assistant, answer.clone());
        Ok(answer)
    }
}

/// The first `n` characters of `text`, never splitting a character
fn leading_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
