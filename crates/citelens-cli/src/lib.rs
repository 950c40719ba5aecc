//! Citelens CLI library.
//!
//! This library provides the core functionality for the Citelens command-line interface,
//! including configuration management, provider selection, command execution, and output formatting.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod provider;
pub mod repl;

pub use app::App;
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use provider::Provider;
