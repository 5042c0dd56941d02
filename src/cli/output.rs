//! Output formatting utilities

use crate::application::{RunPlan, RunReport};
use std::io::{self, BufRead, Write};

/// Format the plan shown before asking for confirmation
pub fn format_plan(plan: &RunPlan) -> String {
    let mut output = String::from("The following entries will be processed:\n");
    for entry in &plan.pending {
        output.push_str(&format!("  - {}\n", entry.heading_key));
    }

    output.push_str(&format!(
        "{} entries to process, {} skipped",
        plan.pending.len(),
        plan.skipped.len()
    ));
    if !plan.empty.is_empty() {
        output.push_str(&format!(", {} empty", plan.empty.len()));
    }
    output.push('\n');
    output
}

/// Format the final tally and any failed entries
pub fn format_report(report: &RunReport) -> String {
    if report.attempted() == 0 {
        return format!(
            "No new journal entries to summarize ({} already summarized{}).\n",
            report.skipped,
            format_unsent(report)
        );
    }

    let mut output = format!(
        "Summarized {}/{} entries ({} failed, {} skipped{})\n",
        report.written.len(),
        report.attempted(),
        report.failed.len(),
        report.skipped,
        format_unsent(report)
    );
    if !report.failed.is_empty() {
        output.push_str("Failed entries (will be retried on the next run):\n");
        for (key, err) in &report.failed {
            output.push_str(&format!("  - {}: {}\n", key, err));
        }
    }
    output
}

/// Counts of candidates never sent to the backend, when there are any
fn format_unsent(report: &RunReport) -> String {
    let mut counts = String::new();
    if report.empty > 0 {
        counts.push_str(&format!(", {} empty", report.empty));
    }
    if report.problems > 0 {
        counts.push_str(&format!(", {} unreadable or without a heading", report.problems));
    }
    counts
}

/// Ask a yes/no question; only `y` or `yes` (any case) proceeds
pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    write!(out, "{} (y/n): ", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
