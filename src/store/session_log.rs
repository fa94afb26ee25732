//! Session transcript.
//!
//! Every line shown to the user and every line typed by the user is appended
//! here in order, so the whole conversation can be saved with the `log`
//! command.

use std::io::Write;
use tracing::debug;

use crate::error::Result;

/// Append-only list of transcript lines.
#[derive(Debug, Default, Clone)]
pub struct SessionLog {
    entries: Vec<String>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry. Trailing line breaks are stripped so that each entry
    /// maps to exactly one line of the saved file.
    pub fn record(&mut self, entry: impl Into<String>) {
        let mut entry = entry.into();
        while entry.ends_with('\n') || entry.ends_with('\r') {
            entry.pop();
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Writes the transcript to `writer`, one entry per line.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        debug!("Writing {} log entries", self.entries.len());

        for entry in self.entries() {
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()?;
        Ok(())
    }
}
