//! Journal entries and their heading keys

use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of an entry: the text of its level-1 heading in the digest.
///
/// Never empty. Markdown entries render as `[[stem]]`, Org entries as the
/// trimmed text following `** Journal Entry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadingKey(String);

impl HeadingKey {
    /// Build a key for a Markdown file (`[[stem]]`)
    pub fn from_markdown_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_string_lossy();
        if stem.trim().is_empty() {
            return None;
        }
        Some(HeadingKey(format!("[[{}]]", stem)))
    }

    /// Build a key from the text after `** Journal Entry`
    ///
    /// A single pair of surrounding `<...>` or `[...]` (Org timestamps) is removed.
    pub fn from_org_heading(rest: &str) -> Option<Self> {
        let rest = rest.trim();
        let unwrapped = strip_timestamp_brackets(rest).unwrap_or(rest).trim();
        if unwrapped.is_empty() {
            return None;
        }
        Some(HeadingKey(unwrapped.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The level-1 heading line this key renders as in the digest
    pub fn heading_line(&self) -> String {
        format!("# {}", self.0)
    }
}

impl fmt::Display for HeadingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_timestamp_brackets(text: &str) -> Option<&str> {
    let inner = text
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .or_else(|| text.strip_prefix('[').and_then(|t| t.strip_suffix(']')))?;

    // "<a> <b>" is two timestamps, not one wrapped value
    if inner.contains(['<', '>', '[', ']']) {
        return None;
    }
    Some(inner)
}

/// A single journal record to summarize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub heading_key: HeadingKey,
    pub body: String,
}

impl JournalEntry {
    pub fn new(heading_key: HeadingKey, body: String) -> Self {
        JournalEntry { heading_key, body }
    }

    /// True when there is nothing worth sending to the backend
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Where entries come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// One entry per Markdown file, in the order given
    MarkdownFiles(Vec<PathBuf>),
    /// Many entries inside a single Org-mode journal
    OrgFile(PathBuf),
}
