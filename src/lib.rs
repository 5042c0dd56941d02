//! jdigest - Journal digest generator
//!
//! Reads journal entries from Markdown files or an Org-mode journal, asks a
//! locally hosted language model for a short summary of each, and appends the
//! summaries to a single Markdown digest. Entries already present in the
//! digest are skipped, so repeated runs only process new entries.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DigestError;
