//! Pipeline handle shared by commands and the chat loop.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::provider::Provider;
use citelens_domain::{CompletionService, PaperSession};
use citelens_extractor::{AssemblyReport, CitationAssembler, ExtractorConfig, LexiconScorer, PaperAssistant};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Owns the async runtime and the pipeline components.
///
/// Providers block, so they are built and dropped outside the runtime and
/// only called from its blocking pool.
pub struct App<L> {
    assembler: CitationAssembler<L, LexiconScorer>,
    assistant: PaperAssistant<L>,
    runtime: Runtime,
}

impl App<Provider> {
    /// Build the app from the CLI configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = Provider::from_config(&config.provider)?;
        Self::new(provider, config.extractor.clone())
    }
}

impl<L> App<L>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create an app around a provider.
    pub fn new(provider: L, config: ExtractorConfig) -> Result<Self> {
        let runtime = Runtime::new()
            .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

        let provider = Arc::new(provider);
        let assembler = CitationAssembler::new(Arc::clone(&provider), LexiconScorer::new(), config.clone())?;
        let assistant = PaperAssistant::new(provider, config);

        Ok(Self {
            assembler,
            assistant,
            runtime,
        })
    }

    /// Run citation assembly over a document.
    pub fn assemble(&self, text: &str) -> AssemblyReport {
        self.runtime.block_on(self.assembler.assemble(text))
    }

    /// Analyze a session, reusing cached records.
    pub fn analyze(&self, session: &mut PaperSession) -> Option<AssemblyReport> {
        self.runtime.block_on(self.assembler.analyze(session))
    }

    /// Summarize a document.
    pub fn summarize(&self, text: &str) -> Result<String> {
        Ok(self.runtime.block_on(self.assistant.summarize(text))?)
    }

    /// Ask a question within a session.
    pub fn ask(&self, session: &mut PaperSession, question: &str) -> Result<String> {
        Ok(self.runtime.block_on(self.assistant.ask(session, question))?)
    }
}
