//! Interactive chat over a single paper.

use crate::app::App;
use crate::commands::cite::render;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use citelens_domain::{CompletionService, PaperSession, RecordFilter, Sentiment};
use citelens_extractor::AssemblyReport;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the chat loop until the user exits.
pub fn run_chat<L>(app: &App<L>, mut session: PaperSession, formatter: &Formatter, history_size: usize) -> Result<()>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    println!(
        "{}",
        formatter.info(&format!(
            "Chatting about a {}-character paper. Type 'help' for commands, 'exit' to quit",
            session.document.chars().count()
        ))
    );
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut last_report: Option<AssemblyReport> = None;

    loop {
        match editor.readline("citelens> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                let outcome = match parse_chat_line(line) {
                    Ok(ChatCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ChatCommand::Help) => {
                        print_help(formatter);
                        Ok(())
                    }
                    Ok(command) => execute_chat_command(command, app, &mut session, &mut last_report, formatter),
                    Err(e) => Err(e),
                };

                if let Err(e) = outcome {
                    eprintln!("{}", formatter.error(&e.to_string()));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// Chat command type.
#[derive(Debug, PartialEq)]
enum ChatCommand {
    Exit,
    Help,
    Cite(Option<Sentiment>),
    Summary,
    History,
    Save(PathBuf),
    Ask(String),
}

/// Parse a chat line. Anything that is not a command is a question.
fn parse_chat_line(line: &str) -> Result<ChatCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match (parts[0], &parts[1..]) {
        ("exit" | "quit" | "q", []) => Ok(ChatCommand::Exit),
        ("help" | "?", []) => Ok(ChatCommand::Help),
        ("cite", []) => Ok(ChatCommand::Cite(None)),
        ("cite", [sentiment]) => sentiment
            .parse()
            .map(|s| ChatCommand::Cite(Some(s)))
            .map_err(|_| CliError::InvalidInput(format!("Unknown sentiment: {}", sentiment))),
        ("summary", []) => Ok(ChatCommand::Summary),
        ("history", []) => Ok(ChatCommand::History),
        ("save", []) => Err(CliError::InvalidInput("Usage: save <path>".to_string())),
        ("save", path) => Ok(ChatCommand::Save(PathBuf::from(path.join(" ")))),
        _ => Ok(ChatCommand::Ask(line.to_string())),
    }
}

fn execute_chat_command<L>(
    command: ChatCommand,
    app: &App<L>,
    session: &mut PaperSession,
    last_report: &mut Option<AssemblyReport>,
    formatter: &Formatter,
) -> Result<()>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    match command {
        ChatCommand::Cite(sentiment) => {
            if let Some(report) = app.analyze(session) {
                *last_report = Some(report);
            }
            if let Some(report) = last_report.as_ref() {
                let filter = match sentiment {
                    Some(sentiment) => RecordFilter::all().with_sentiment(sentiment),
                    None => RecordFilter::all(),
                };
                println!("{}", render(report, &filter, formatter)?);
            }
        }
        ChatCommand::Summary => {
            let summary = app.summarize(&session.document)?;
            println!("{}", formatter.format_text("Summary", &summary)?);
        }
        ChatCommand::History => {
            println!("{}", formatter.format_history(&session.chat));
        }
        ChatCommand::Save(path) => {
            std::fs::write(&path, session.transcript())?;
            println!("{}", formatter.success(&format!("Transcript saved to {}", path.display())));
        }
        ChatCommand::Ask(question) => {
            let answer = app.ask(session, &question)?;
            println!("{}", formatter.format_text("Assistant", &answer)?);
        }
        ChatCommand::Exit | ChatCommand::Help => {}
    }

    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", e),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let citelens_dir = home.join(".citelens");
    std::fs::create_dir_all(&citelens_dir)?;
    Ok(citelens_dir.join("chat_history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <question>                     - Ask a question about the paper");
    println!("  cite [positive|negative|neutral] - Extract and show citations");
    println!("  summary                        - Summarize the paper");
    println!("  history                        - Show the conversation so far");
    println!("  save <path>                    - Save the conversation to a file");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit");
    println!();
}
