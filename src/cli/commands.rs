//! CLI command definitions

use crate::domain::InputSource;
use crate::error::{DigestError, Result};
use crate::infrastructure::Overrides;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jdigest")]
#[command(
    about = "Summarize journal entries into one Markdown digest using a local LLM",
    long_about = None
)]
#[command(version)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["input_journal_org", "input_entry_md"])
))]
pub struct Cli {
    /// Org-mode journal containing `** Journal Entry <date>` sections
    #[arg(short = 'j', long, value_name = "ORG_FILE")]
    pub input_journal_org: Option<PathBuf>,

    /// Markdown entry files (one entry per file) or directories of them
    #[arg(short = 'e', long, value_name = "MD_FILE", num_args = 1..)]
    pub input_entry_md: Vec<PathBuf>,

    /// Markdown digest to append summaries to (created if missing)
    #[arg(short = 'o', long, value_name = "OUTPUT_MD")]
    pub output_md: PathBuf,

    /// Model name [default: llama3.2]
    #[arg(short, long, env = "JDIGEST_MODEL")]
    pub model: Option<String>,

    /// Backend base URL [default: http://localhost:11434]
    #[arg(short, long, env = "JDIGEST_URL")]
    pub url: Option<String>,

    /// Prompt template; use {entry_text} as the placeholder
    #[arg(long, value_name = "TEMPLATE")]
    pub prompt: Option<String>,

    /// Per-entry request timeout in seconds [default: 120]
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// TOML config file with model, url, prompt and timeout_secs
    #[arg(short, long, env = "JDIGEST_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. info, jdigest=trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// The selected input mode
    pub fn input_source(&self) -> Result<InputSource> {
        match (&self.input_journal_org, self.input_entry_md.is_empty()) {
            (Some(_), false) => Err(DigestError::InputMode(
                "Please provide either --input-journal-org or --input-entry-md, not both"
                    .to_string(),
            )),
            (Some(org), true) => Ok(InputSource::OrgFile(org.clone())),
            (None, false) => Ok(InputSource::MarkdownFiles(self.input_entry_md.clone())),
            (None, true) => Err(DigestError::InputMode(
                "No input given: use --input-journal-org or --input-entry-md".to_string(),
            )),
        }
    }

    /// Settings given on the command line
    pub fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            url: self.url.clone(),
            prompt: self.prompt.clone(),
            timeout_secs: self.timeout,
        }
    }
}
