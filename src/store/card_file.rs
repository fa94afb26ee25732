//! Reading and writing card files.
//!
//! Export overwrites the target with one `term : definition, count` line per
//! card. Import upserts every well-formed line and collects the malformed
//! ones so the caller can report them without aborting the load.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use super::CardStore;
use crate::error::Result;
use crate::models::{Card, RecordError};

/// Outcome of loading a card file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of cards upserted into the store.
    pub loaded: usize,
    /// One-based line numbers of rejected lines and why they were rejected.
    pub rejected: Vec<(usize, RecordError)>,
}

impl CardStore {
    /// Writes every card to `path`, replacing any existing file.
    ///
    /// Returns the number of cards written.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be created or written. The
    /// store itself is never modified.
    pub fn export_to(&self, path: &Path) -> Result<usize> {
        debug!("Exporting {} cards to {}", self.len(), path.display());

        let mut writer = BufWriter::new(File::create(path)?);
        let mut written = 0;
        for card in self.cards() {
            writeln!(writer, "{}", card)?;
            written += 1;
        }
        writer.flush()?;

        info!("Exported {} cards to {}", written, path.display());
        Ok(written)
    }

    /// Loads cards from `path`, overwriting cards with the same term.
    ///
    /// Blank lines are skipped. Malformed lines are recorded in the returned
    /// summary and the rest of the file is still loaded. The whole file is
    /// read before the store is touched, so a read error leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be opened or read.
    pub fn import_from(&mut self, path: &Path) -> Result<ImportSummary> {
        debug!("Importing cards from {}", path.display());

        let reader = BufReader::new(File::open(path)?);
        let mut cards = Vec::new();
        let mut summary = ImportSummary::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Card>() {
                Ok(card) => cards.push(card),
                Err(e) => {
                    warn!("Skipping line {} of {}: {}", index + 1, path.display(), e);
                    summary.rejected.push((index + 1, e));
                },
            }
        }

        summary.loaded = cards.len();
        for card in cards {
            self.upsert(card);
        }

        info!(
            "Imported {} cards from {} ({} rejected)",
            summary.loaded,
            path.display(),
            summary.rejected.len()
        );
        Ok(summary)
    }
}
