//! Prompt construction for completion requests

/// Leading instruction of every citation prompt
pub const CITATION_INSTRUCTION: &str = "Extract all citation sentences from the following text.";

/// Leading instruction of every reference prompt
pub const REFERENCE_INSTRUCTION: &str = "Extract the references section from the following text.";

/// Leading instruction of every summary prompt
pub const SUMMARY_INSTRUCTION: &str = "Summarize the following research paper concisely.";

/// Leading instruction of every question prompt
pub const QUESTION_INSTRUCTION: &str = "Based on the following research paper, answer this question.";

/// System message for summaries
pub const SUMMARY_SYSTEM: &str = "You are an expert research paper summarizer.";

/// System message for question answering
pub const ASSISTANT_SYSTEM: &str = "You are a helpful assistant for analyzing research papers.";

const CITATION_DETAILS: &str = r#"A citation sentence is any sentence that refers to other published work, for
example by author name, year, or a bracketed reference number.
Copy each sentence exactly as it appears in the text."#;

const REFERENCE_DETAILS: &str = r#"Locate the bibliography (usually titled "References" or "Bibliography") and
split it into individual entries, keeping each entry's authors, title, venue
and year together."#;

const LINE_OUTPUT_REMINDER: &str = r#"Output one item per line.
Do not number the items and do not add any commentary.
If there is nothing to extract, output nothing."#;

/// The kind of prompt to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Citation sentences from one chunk
    Citations,
    /// Bibliography entries from the whole document
    References,
    /// Concise paper summary
    Summary,
}

/// Builds prompts for the completion service
pub struct PromptBuilder<'a> {
    kind: PromptKind,
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder over `text`
    pub fn new(kind: PromptKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        match self.kind {
            PromptKind::Citations => {
                prompt.push_str(CITATION_INSTRUCTION);
                prompt.push('\n');
                prompt.push_str(CITATION_DETAILS);
            }
            PromptKind::References => {
                prompt.push_str(REFERENCE_INSTRUCTION);
                prompt.push('\n');
                prompt.push_str(REFERENCE_DETAILS);
            }
            PromptKind::Summary => prompt.push_str(SUMMARY_INSTRUCTION),
        }
        prompt.push_str("\n\n");

        push_delimited(&mut prompt, self.text);

        if self.kind != PromptKind::Summary {
            prompt.push_str(LINE_OUTPUT_REMINDER);
        }

        prompt
    }
}

/// Build a question prompt over a (possibly truncated) paper excerpt
pub fn question_prompt(excerpt: &str, question: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(QUESTION_INSTRUCTION);
    prompt.push_str("\n\n");
    push_delimited(&mut prompt, excerpt);
    prompt.push_str("Question: ");
    prompt.push_str(question.trim());
    prompt
}

fn push_delimited(prompt: &mut String, text: &str) {
    prompt.push_str("Text:\n");
    prompt.push_str("---\n");
    prompt.push_str(text);
    prompt.push_str("\n---\n\n");
}
