//! The consolidated digest file: ledger source and append target

use crate::domain::{HeadingKey, Ledger};
use crate::error::{DigestError, Result};
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Markdown file collecting one `# heading` block per summarized entry
#[derive(Debug, Clone)]
pub struct DigestFile {
    path: PathBuf,
}

impl DigestFile {
    pub fn new(path: PathBuf) -> Self {
        DigestFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the digest text (empty if the file doesn't exist yet)
    pub fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(DigestError::OutputUnreadable {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Snapshot the headings already present in the digest
    pub fn ledger(&self) -> Result<Ledger> {
        if self.path.is_dir() {
            return Err(DigestError::Input(format!(
                "Output path is a directory: {}",
                self.path.display()
            )));
        }
        Ok(Ledger::from_digest(&self.read()?))
    }

    /// Append a summary block, creating the file if needed.
    ///
    /// The block is written with a single call and synced before returning.
    pub fn append(&self, key: &HeadingKey, summary: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut block = String::new();
        if !ends_with_newline(&mut file)? {
            block.push('\n');
        }
        block.push_str(&render_block(key, summary));

        file.write_all(block.as_bytes())?;
        file.sync_data()?;
        Ok(())
    }
}

/// Render one digest block: heading, blank line, summary, blank line
pub fn render_block(key: &HeadingKey, summary: &str) -> String {
    format!("{}\n\n{}\n\n", key.heading_line(), summary)
}

/// True for an empty file or one whose last byte is a newline
fn ends_with_newline(file: &mut fs::File) -> Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
