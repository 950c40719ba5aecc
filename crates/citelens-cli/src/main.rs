//! Citelens CLI - Citation extraction and analysis for research papers.

use citelens_cli::commands;
use citelens_cli::document::load_document;
use citelens_cli::repl;
use citelens_cli::{App, Cli, Command, Config, Formatter};
use citelens_domain::PaperSession;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> citelens_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // The provider is only needed by commands that talk to a model
    let app = || App::from_config(&config);

    match cli.command {
        Command::Cite(args) => commands::execute_cite(args, &app()?, &formatter),
        Command::Summarize(args) => commands::execute_summarize(args, &app()?, &formatter),
        Command::Ask(args) => commands::execute_ask(args, &app()?, &formatter),
        Command::Chat(args) => {
            let session = PaperSession::new(load_document(&args.file)?);
            repl::run_chat(&app()?, session, &formatter, config.settings.history_size)
        }
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter),
    }
}
