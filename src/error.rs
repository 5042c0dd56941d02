//! Error types for jdigest

use crate::infrastructure::backend::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jdigest
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Invalid input: {0}")]
    Input(String),

    /// Neither or both input modes were selected
    #[error("Invalid input: {0}")]
    InputMode(String),

    #[error("Invalid prompt template: {0}")]
    InvalidPrompt(String),

    #[error("Cannot read output file {path}: {source}")]
    OutputUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read input file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Backend check failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Summarization cancelled")]
    Declined,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DigestError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DigestError::Input(_)
            | DigestError::InputMode(_)
            | DigestError::InvalidPrompt(_)
            | DigestError::OutputUnreadable { .. } => 2,
            DigestError::Backend(_) => 3,
            DigestError::Declined => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DigestError::Backend(BackendError::Connection { url, .. }) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Start the server with 'ollama serve'\n\
                    • Check the backend URL (currently {})\n\
                    • Pass a different URL with --url or JDIGEST_URL",
                    self, url
                )
            }
            DigestError::Backend(BackendError::ModelUnavailable { model, .. }) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Download the model with 'ollama pull {}'\n\
                    • List installed models with 'ollama list'\n\
                    • Pick another model with --model",
                    self, model
                )
            }
            DigestError::InputMode(_) => {
                format!(
                    "{}\n\n\
                    Provide exactly one input:\n\
                    • -e/--input-entry-md <FILE>... for Markdown entries\n\
                    • -j/--input-journal-org <FILE> for an Org journal",
                    self
                )
            }
            DigestError::InvalidPrompt(_) => {
                format!(
                    "{}\n\n\
                    Example: --prompt 'Summarize this entry:\\n\\n{{entry_text}}'",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DigestError
pub type Result<T> = std::result::Result<T, DigestError>;
