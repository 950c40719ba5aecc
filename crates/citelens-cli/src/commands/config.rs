//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", formatter.info(&format!("Config file: {}", path.display())));
            println!("{}", config.redacted().to_toml()?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to(path)?;
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let init = |force| ConfigArgs {
            action: ConfigAction::Init { force },
        };
        execute_config(init(false), &Config::default(), &path, &formatter).unwrap();
        assert!(path.exists());

        assert!(execute_config(init(false), &Config::default(), &path, &formatter).is_err());
        assert!(execute_config(init(true), &Config::default(), &path, &formatter).is_ok());
    }
}
