//! Application layer - Use cases and orchestration

pub mod summarize;

pub use summarize::{RunPlan, RunReport, SummarizeService};
