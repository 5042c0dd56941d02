//! Configuration management

use crate::domain::PromptTemplate;
use crate::error::{DigestError, Result};
use crate::infrastructure::ollama::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_TIMEOUT_SECONDS};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Optional settings read from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub model: Option<String>,
    pub url: Option<String>,
    pub prompt: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Settings given on the command line (or via their environment variables)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub url: Option<String>,
    pub prompt: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved and validated settings for a run
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: String,
    pub url: String,
    pub prompt: PromptTemplate,
    pub timeout: Duration,
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            DigestError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents)
            .map_err(|e| DigestError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load config if a path was given, otherwise use an empty config
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Config::default()),
        }
    }

    /// Combine with command-line overrides and built-in defaults
    pub fn resolve(self, overrides: Overrides) -> Result<Settings> {
        let model = overrides
            .model
            .or(self.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(DigestError::Input("Model name must not be empty".to_string()));
        }

        let url = overrides
            .url
            .or(self.url)
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        let url = url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(DigestError::Input("Backend URL must not be empty".to_string()));
        }

        let prompt = match overrides.prompt.or(self.prompt) {
            Some(template) => PromptTemplate::parse(&template)?,
            None => PromptTemplate::default(),
        };

        let timeout_secs = overrides
            .timeout_secs
            .or(self.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        if timeout_secs == 0 {
            return Err(DigestError::Input(
                "Timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(Settings {
            model,
            url,
            prompt,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
