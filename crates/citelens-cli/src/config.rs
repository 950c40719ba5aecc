//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use citelens_extractor::ExtractorConfig;
use citelens_llm::openai;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline tuning
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which completion service to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions
    OpenAi,
    /// Local Ollama server
    Ollama,
}

/// Completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider kind
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key (the environment variable takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Chat history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".citelens").join("config.toml"))
    }

    /// Resolve the configuration path, preferring an explicit override.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.provider.api_key.is_some() {
            config.provider.api_key = Some("********".to_string());
        }
        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(CliError::Config("provider.model must not be empty".into()));
        }
        self.extractor.validate().map_err(CliError::Config)
    }
}

impl ProviderConfig {
    /// API key from `OPENAI_API_KEY`, falling back to the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(openai::API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            model: default_model(),
            endpoint: None,
            api_key: None,
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_kind() -> ProviderKind {
    ProviderKind::OpenAi
}

fn default_model() -> String {
    openai::DEFAULT_MODEL.to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.model, "gpt-3.5-turbo");
        assert_eq!(config.extractor.chunk_max_tokens, 3000);
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.provider.kind = ProviderKind::Ollama;
        config.provider.model = "llama3".to_string();
        config.extractor.max_concurrent_requests = 4;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider.kind, ProviderKind::Ollama);
        assert_eq!(loaded.provider.model, "llama3");
        assert_eq!(loaded.extractor.max_concurrent_requests, 4);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider]\nkind = \"ollama\"\n\n[extractor]\nchunk_overlap = 2\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.model, "gpt-3.5-turbo");
        assert_eq!(config.extractor.chunk_overlap, 2);
        assert_eq!(config.extractor.chunk_max_tokens, 3000);
    }

    #[test]
    fn test_invalid_extractor_section_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nsimilarity_threshold = 3.0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_redacted_masks_key() {
        let mut config = Config::default();
        config.provider.api_key = Some("sk-secret".to_string());
        let shown = config.redacted().to_toml().unwrap();
        assert!(!shown.contains("sk-secret"));
        assert!(shown.contains("********"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom.toml");
        assert_eq!(Config::resolve_path(Some(&path)).unwrap(), path);
    }
}
