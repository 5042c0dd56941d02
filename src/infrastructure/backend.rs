//! Inference backend contract

use thiserror::Error;

/// Failures talking to the inference backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("could not connect to {url}: {message}")]
    Connection { url: String, message: String },

    #[error("no response within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("model '{model}' is not available: {message}")]
    ModelUnavailable { model: String, message: String },

    #[error("backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

/// A service that turns a prompt into generated text
pub trait SummaryBackend {
    /// Check reachability and model availability before a batch
    fn probe(&self) -> Result<(), BackendError>;

    /// Generate a complete (non-streamed) response for the prompt
    fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}
