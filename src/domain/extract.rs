//! Entry extraction from Markdown files and Org-mode journals

use crate::domain::entry::{HeadingKey, InputSource, JournalEntry};
use crate::error::{DigestError, Result};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Regex for Org journal headings: `** Journal Entry <rest>`
fn org_entry_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\*\* Journal Entry(?:\s+(.*))?$").unwrap())
}

/// A candidate entry that could not be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionProblem {
    /// A Markdown input could not be read
    Unreadable { path: PathBuf, reason: String },
    /// No heading key could be derived
    MissingKey { location: String },
}

impl fmt::Display for ExtractionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionProblem::Unreadable { path, reason } => {
                write!(f, "cannot read {}: {}", path.display(), reason)
            }
            ExtractionProblem::MissingKey { location } => {
                write!(f, "no heading key for entry at {}", location)
            }
        }
    }
}

/// Result of extracting entries from an input source
#[derive(Debug, Default)]
pub struct Extraction {
    /// Entries in input order
    pub entries: Vec<JournalEntry>,
    /// Candidates that were rejected, in input order
    pub problems: Vec<ExtractionProblem>,
}

/// Extract all entries from the given source.
///
/// Markdown read failures are collected as problems; an unreadable Org
/// journal is an error since it is the only input.
pub fn extract(source: &InputSource) -> Result<Extraction> {
    match source {
        InputSource::MarkdownFiles(paths) => Ok(extract_markdown(paths)),
        InputSource::OrgFile(path) => {
            let content = fs::read_to_string(path).map_err(|source| DigestError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(parse_org_journal(&content, &path.display().to_string()))
        }
    }
}

/// Expand directories to the Markdown files directly inside them, sorted by name.
///
/// Directory entries that cannot be listed are returned as problems.
pub fn expand_markdown_inputs(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<ExtractionProblem>) {
    let mut expanded = Vec::new();
    let mut problems = Vec::new();

    for path in paths {
        if !path.is_dir() {
            expanded.push(path.clone());
            continue;
        }

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let reason = err
                        .io_error()
                        .map_or_else(|| err.to_string(), |e| e.to_string());
                    problems.push(ExtractionProblem::Unreadable {
                        path: err.path().unwrap_or(path.as_path()).to_path_buf(),
                        reason,
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().is_some_and(|ext| ext == "md") {
                expanded.push(entry.into_path());
            }
        }
    }

    (expanded, problems)
}

fn extract_markdown(paths: &[PathBuf]) -> Extraction {
    let (files, listing_problems) = expand_markdown_inputs(paths);
    let mut extraction = Extraction::default();

    for problem in listing_problems {
        tracing::warn!(%problem, "skipping markdown directory");
        extraction.problems.push(problem);
    }

    for path in files {
        match read_markdown_entry(&path) {
            Ok(entry) => extraction.entries.push(entry),
            Err(problem) => {
                tracing::warn!(path = %path.display(), %problem, "skipping markdown input");
                extraction.problems.push(problem);
            }
        }
    }

    extraction
}

fn read_markdown_entry(path: &Path) -> std::result::Result<JournalEntry, ExtractionProblem> {
    let heading_key =
        HeadingKey::from_markdown_path(path).ok_or_else(|| ExtractionProblem::MissingKey {
            location: path.display().to_string(),
        })?;

    let body = fs::read_to_string(path).map_err(|e| ExtractionProblem::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(JournalEntry::new(heading_key, body))
}

/// Parse journal entries out of Org-mode text.
///
/// An entry starts at a `** Journal Entry <key>` line and its body runs until
/// the next line starting with `**` (any heading at level two or deeper) or
/// end of input. `source_name` is only used in problem reports.
pub fn parse_org_journal(content: &str, source_name: &str) -> Extraction {
    let mut extraction = Extraction::default();
    // (key, first line number, body lines); key is None for a rejected heading
    let mut current: Option<(Option<HeadingKey>, usize, Vec<&str>)> = None;

    for (idx, line) in content.lines().enumerate() {
        if !line.starts_with("**") {
            if let Some((_, _, body)) = current.as_mut() {
                body.push(line);
            }
            continue;
        }

        if let Some(finished) = current.take() {
            finish_org_entry(finished, source_name, &mut extraction);
        }

        if let Some(caps) = org_entry_regex().captures(line) {
            let rest = caps.get(1).map_or("", |m| m.as_str());
            current = Some((HeadingKey::from_org_heading(rest), idx + 1, Vec::new()));
        }
    }

    if let Some(finished) = current.take() {
        finish_org_entry(finished, source_name, &mut extraction);
    }

    extraction
}

fn finish_org_entry(
    (key, line_no, body): (Option<HeadingKey>, usize, Vec<&str>),
    source_name: &str,
    extraction: &mut Extraction,
) {
    match key {
        Some(heading_key) => {
            let body = body.join("\n").trim().to_string();
            extraction.entries.push(JournalEntry::new(heading_key, body));
        }
        None => {
            let problem = ExtractionProblem::MissingKey {
                location: format!("{}:{}", source_name, line_no),
            };
            tracing::warn!(%problem, "rejecting org heading");
            extraction.problems.push(problem);
        }
    }
}
