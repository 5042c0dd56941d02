//! Summarize journal entries use case
//!
//! Runs the whole workflow in order: snapshot the digest ledger, probe the
//! backend, extract entries, drop the ones already summarized, ask for
//! confirmation, then summarize and append one entry at a time. Each summary
//! is written as soon as it arrives so an interrupted run keeps its progress.

use crate::domain::prompt::clean_summary;
use crate::domain::{
    extract, ExtractionProblem, HeadingKey, InputSource, JournalEntry, PromptTemplate,
};
use crate::error::{DigestError, Result};
use crate::infrastructure::{BackendError, DigestFile, SummaryBackend};

/// Entries selected for a run, shown at the confirmation gate
#[derive(Debug, Default)]
pub struct RunPlan {
    /// Entries to summarize, in input order
    pub pending: Vec<JournalEntry>,
    /// Keys already present in the digest
    pub skipped: Vec<HeadingKey>,
    /// Keys whose body is empty
    pub empty: Vec<HeadingKey>,
    /// Candidates that could not be extracted
    pub problems: Vec<ExtractionProblem>,
}

impl RunPlan {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Outcome of a completed run
#[derive(Debug, Default)]
pub struct RunReport {
    pub written: Vec<HeadingKey>,
    pub failed: Vec<(HeadingKey, BackendError)>,
    pub skipped: usize,
    pub empty: usize,
    pub problems: usize,
}

impl RunReport {
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Service for summarizing entries into a digest file
pub struct SummarizeService<B: SummaryBackend> {
    backend: B,
    digest: DigestFile,
    template: PromptTemplate,
}

impl<B: SummaryBackend> SummarizeService<B> {
    /// Create a new summarize service
    pub fn new(backend: B, digest: DigestFile, template: PromptTemplate) -> Self {
        SummarizeService {
            backend,
            digest,
            template,
        }
    }

    /// Execute a full run.
    ///
    /// `confirm` is called once with the plan when there is work to do and
    /// returns whether to proceed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The digest exists but cannot be read
    /// - The backend probe fails (unreachable or model missing)
    /// - The Org journal cannot be read
    /// - The user declines
    /// - Appending to the digest fails
    ///
    /// Per-entry backend failures are not errors; they are listed in the report.
    pub fn execute<F>(&self, source: &InputSource, confirm: F) -> Result<RunReport>
    where
        F: FnOnce(&RunPlan) -> Result<bool>,
    {
        // 1. Ledger snapshot, taken once
        let ledger = self.digest.ledger()?;
        tracing::debug!(
            headings = ledger.len(),
            digest = %self.digest.path().display(),
            "ledger loaded"
        );

        // 2. Connectivity probe
        self.backend.probe()?;
        tracing::debug!("backend probe succeeded");

        // 3. Extract
        let extraction = extract(source)?;
        tracing::debug!(
            entries = extraction.entries.len(),
            problems = extraction.problems.len(),
            "entries extracted"
        );

        for problem in &extraction.problems {
            eprintln!("Warning: {}", problem);
        }

        // 4. Filter
        let mut plan = RunPlan {
            problems: extraction.problems,
            ..RunPlan::default()
        };
        for entry in extraction.entries {
            if ledger.contains(&entry.heading_key) {
                plan.skipped.push(entry.heading_key);
            } else if entry.is_empty() {
                plan.empty.push(entry.heading_key);
            } else {
                plan.pending.push(entry);
            }
        }

        let mut report = RunReport {
            skipped: plan.skipped.len(),
            empty: plan.empty.len(),
            problems: plan.problems.len(),
            ..RunReport::default()
        };

        if plan.is_empty() {
            tracing::debug!("nothing to summarize");
            return Ok(report);
        }

        // 5. Confirm
        if !confirm(&plan)? {
            return Err(DigestError::Declined);
        }

        // 6. Process sequentially
        let total = plan.pending.len();
        for (i, entry) in plan.pending.into_iter().enumerate() {
            println!(
                "\nProcessing entry {}/{} (heading: {})...",
                i + 1,
                total,
                entry.heading_key
            );

            match self.summarize(&entry) {
                Ok(summary) => {
                    self.digest.append(&entry.heading_key, &summary)?;
                    tracing::info!(heading = %entry.heading_key, "summary appended");
                    println!("  Summary appended to {}", self.digest.path().display());
                    report.written.push(entry.heading_key);
                }
                Err(e) => {
                    tracing::warn!(
                        heading = %entry.heading_key,
                        error = %e,
                        "summarization failed"
                    );
                    eprintln!("  Failed to summarize {}: {}", entry.heading_key, e);
                    report.failed.push((entry.heading_key, e));
                }
            }
        }

        Ok(report)
    }

    /// Summarize a single entry
    pub fn summarize(&self, entry: &JournalEntry) -> std::result::Result<String, BackendError> {
        let prompt = self.template.render(&entry.body);
        let raw = self.backend.generate(&prompt)?;
        let summary = clean_summary(&raw);

        if summary.is_empty() {
            return Err(BackendError::MalformedResponse(
                "backend returned an empty summary".to_string(),
            ));
        }
        Ok(summary)
    }
}
