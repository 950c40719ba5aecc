//! Ask command implementation.

use crate::app::App;
use crate::cli::AskArgs;
use crate::document::load_document;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use citelens_domain::{CompletionService, PaperSession};

/// Execute the ask command.
pub fn execute_ask<L>(args: AskArgs, app: &App<L>, formatter: &Formatter) -> Result<()>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let question = args.question.join(" ");
    if question.trim().is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".to_string()));
    }

    let mut session = PaperSession::new(load_document(&args.file)?);
    let answer = app.ask(&mut session, &question)?;

    println!("{}", formatter.format_text("Answer", &answer)?);
    Ok(())
}
