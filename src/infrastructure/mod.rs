//! Infrastructure layer - External I/O and persistence

pub mod backend;
pub mod config;
pub mod digest_file;
pub mod logging;
pub mod ollama;

pub use backend::{BackendError, SummaryBackend};
pub use config::{Config, Overrides, Settings};
pub use digest_file::DigestFile;
pub use ollama::OllamaClient;
