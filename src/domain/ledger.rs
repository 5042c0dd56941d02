//! Ledger of already-summarized entries
//!
//! The digest file itself is the only persisted state. A snapshot of its
//! heading lines is taken once at the start of a run and consulted for every
//! extracted entry.

use crate::domain::entry::HeadingKey;
use std::collections::HashSet;

/// Heading lines present in an existing digest
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    headings: HashSet<String>,
}

impl Ledger {
    /// Build a ledger snapshot from the digest's text (empty for a new digest)
    pub fn from_digest(existing: &str) -> Self {
        let headings = existing
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("# "))
            .map(str::to_string)
            .collect();
        Ledger { headings }
    }

    /// Whether a summary for this key was already written
    pub fn contains(&self, key: &HeadingKey) -> bool {
        self.headings.contains(&key.heading_line())
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }
}

/// Check a single key against digest text without building a snapshot
pub fn already_summarized(existing: &str, key: &HeadingKey) -> bool {
    let expected = key.heading_line();
    existing.lines().any(|line| line.trim() == expected)
}
