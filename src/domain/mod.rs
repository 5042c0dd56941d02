//! Domain layer - Entries, extraction and skip detection

pub mod entry;
pub mod extract;
pub mod ledger;
pub mod prompt;

pub use entry::{HeadingKey, InputSource, JournalEntry};
pub use extract::{extract, Extraction, ExtractionProblem};
pub use ledger::{already_summarized, Ledger};
pub use prompt::PromptTemplate;
