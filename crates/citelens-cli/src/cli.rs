//! CLI command definitions and argument parsing.

use citelens_domain::Sentiment;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Citelens - Extract, align and assess citations in research papers.
#[derive(Debug, Parser)]
#[command(name = "citelens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CITELENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (citation sentences only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract citations, match references and score sentiment
    Cite(CiteArgs),

    /// Summarize a paper
    Summarize(DocumentArgs),

    /// Ask a single question about a paper
    Ask(AskArgs),

    /// Interactive session over a paper
    Chat(DocumentArgs),

    /// Show or initialize the configuration
    Config(ConfigArgs),
}

/// A paper on disk (PDF or plain text).
#[derive(Debug, Parser)]
pub struct DocumentArgs {
    /// Path to the paper
    pub file: PathBuf,
}

/// Arguments for the cite command.
#[derive(Debug, Parser)]
pub struct CiteArgs {
    /// Path to the paper
    pub file: PathBuf,

    /// Only show citations with this sentiment
    #[arg(short, long, value_enum)]
    pub sentiment: Option<SentimentArg>,

    /// Only show citations containing this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Path to the paper
    pub file: PathBuf,

    /// The question
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

/// Sentiment filter values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SentimentArg {
    /// Positive citations
    Positive,
    /// Negative citations
    Negative,
    /// Neutral citations
    Neutral,
}

impl From<SentimentArg> for Sentiment {
    fn from(arg: SentimentArg) -> Self {
        match arg {
            SentimentArg::Positive => Sentiment::Positive,
            SentimentArg::Negative => Sentiment::Negative,
            SentimentArg::Neutral => Sentiment::Neutral,
        }
    }
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cite_with_filters() {
        let cli = Cli::parse_from([
            "citelens", "--format", "json", "cite", "paper.pdf", "--sentiment", "negative", "--search", "smith",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Cite(args) => {
                assert_eq!(args.file, PathBuf::from("paper.pdf"));
                assert_eq!(Sentiment::from(args.sentiment.unwrap()), Sentiment::Negative);
                assert_eq!(args.search.as_deref(), Some("smith"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_multi_word_question() {
        let cli = Cli::parse_from(["citelens", "ask", "paper.txt", "What", "is", "the", "method?"]);
        match cli.command {
            Command::Ask(args) => assert_eq!(args.question.join(" "), "What is the method?"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["citelens", "ask", "paper.txt"]).is_err());
    }
}
