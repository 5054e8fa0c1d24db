//! Journal Recovery
//!
//! Replays a leftover journal into the main data file after a crash, and
//! inspects journals without touching them.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::JournalConfig;
use crate::error::{JournalError, Result};
use super::{Journal, JournalReader};

/// Handles journal recovery after a crash
pub struct JournalRecovery;

/// Summary of a journal produced by `verify`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalStats {
    /// Number of complete records
    pub entry_count: u64,

    /// Number of different pages the records touch
    pub distinct_pages: u64,

    /// Highest page index referenced, if any
    pub highest_page: Option<u64>,

    /// Journal file length in bytes
    pub file_len: u64,
}

/// Result of a recovery operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Whether a journal existed at the given path
    pub journal_found: bool,

    /// Number of records written into the data file
    pub entries_applied: u64,
}

impl JournalRecovery {
    /// Replay the journal at `path` into `target` and discard it
    ///
    /// This will:
    /// 1. Do nothing if no journal exists
    /// 2. Open it (a corrupt journal is reported and left in place)
    /// 3. Apply every record to `target`
    /// 4. Sync `target`
    /// 5. Delete the journal
    ///
    /// Any failure before step 5 leaves the journal on disk so recovery can
    /// be retried.
    pub fn recover(path: &Path, target: &mut File, config: JournalConfig) -> Result<RecoveryResult> {
        let mut journal = match Journal::open_existing(path, config) {
            Ok(journal) => journal,
            Err(JournalError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("journal: nothing to recover at {}", path.display());
                return Ok(RecoveryResult {
                    journal_found: false,
                    entries_applied: 0,
                });
            }
            Err(e) => return Err(e),
        };
        let entries_applied = journal.apply(target)?;

        target.sync_all().map_err(|e| {
            tracing::error!(
                "journal: failed to sync data file after applying {}: {}",
                path.display(),
                e
            );
            e
        })?;

        journal.destroy()?;

        tracing::info!(
            "journal: recovered {} entries from {}",
            entries_applied,
            path.display()
        );

        Ok(RecoveryResult {
            journal_found: true,
            entries_applied,
        })
    }

    /// Inspect a journal without modifying it
    ///
    /// Unlike `Journal::open`, a missing file is an error rather than being
    /// created.
    pub fn verify(path: &Path, config: JournalConfig) -> Result<JournalStats> {
        config.validate()?;

        let mut file = File::open(path)?;
        let file_len = file.metadata()?.len();

        let record_size = config.record_size();
        if file_len % record_size != 0 {
            return Err(JournalError::Corrupt(format!(
                "{}: length {} is not a multiple of record size {}",
                path.display(),
                file_len,
                record_size
            )));
        }

        let entry_count = file_len / record_size;
        let mut pages = BTreeSet::new();

        for entry in JournalReader::new(&mut file, config.page_size, entry_count)?.entries() {
            let entry = entry?;
            entry.target_offset(config.page_size)?;
            pages.insert(entry.page_index);
        }

        Ok(JournalStats {
            entry_count,
            distinct_pages: pages.len() as u64,
            highest_page: pages.last().copied(),
            file_len,
        })
    }
}
