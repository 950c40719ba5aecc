//! Summarize command implementation.

use crate::app::App;
use crate::cli::DocumentArgs;
use crate::document::load_document;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use citelens_domain::CompletionService;

/// Execute the summarize command.
pub fn execute_summarize<L>(args: DocumentArgs, app: &App<L>, formatter: &Formatter) -> Result<()>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let text = load_document(&args.file)?;
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no extractable text",
            args.file.display()
        )));
    }

    let summary = app.summarize(&text)?;
    println!("{}", formatter.format_text("Summary", &summary)?);
    Ok(())
}
