//! Journal file
//!
//! Owns the backing file and implements the append → sync → apply → destroy
//! lifecycle.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::JournalConfig;
use crate::error::{JournalError, Result};
use super::{JournalEntry, JournalIterator, JournalReader};

/// An open page journal
///
/// ## Ownership:
/// - The file handle is exclusively owned and closed on drop, including when
///   `open` bails out after the file was created.
/// - Mutating operations take `&mut self`; callers sharing a journal across
///   threads must wrap it in a mutex.
/// - `destroy` consumes the journal, so a destroyed journal cannot be reused.
#[derive(Debug)]
pub struct Journal {
    /// Backing file path (needed again by destroy)
    path: PathBuf,

    /// Read/write handle; cursor position is unspecified between calls
    file: File,

    /// Number of complete records in the file
    entry_count: u64,

    /// Page size and derived record size
    config: JournalConfig,
}

impl Journal {
    /// Open or create the journal at `path`
    ///
    /// Fails with `Corrupt` if the file length is not a whole number of
    /// records. That means an append was cut short; no repair is attempted.
    pub fn open(path: impl AsRef<Path>, config: JournalConfig) -> Result<Self> {
        Self::open_with(path.as_ref(), config, true)
    }

    /// Open the journal at `path` only if it already exists
    ///
    /// A missing file is an `Io` error of kind `NotFound`; nothing is created.
    pub fn open_existing(path: impl AsRef<Path>, config: JournalConfig) -> Result<Self> {
        Self::open_with(path.as_ref(), config, false)
    }

    fn open_with(path: &Path, config: JournalConfig, create: bool) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(JournalError::InvalidArgument(
                "journal path must not be empty".to_string(),
            ));
        }
        config.validate()?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(create)
            .truncate(false)
            .open(path)
            .map_err(|e| {
                if create || e.kind() != ErrorKind::NotFound {
                    tracing::error!("journal: failed to open {}: {}", path.display(), e);
                }
                e
            })?;

        let file_len = file
            .metadata()
            .map_err(|e| {
                tracing::error!(
                    "journal: failed to determine length of {}: {}",
                    path.display(),
                    e
                );
                e
            })?
            .len();

        let record_size = config.record_size();
        if file_len % record_size != 0 {
            tracing::warn!(
                "journal: {} is corrupt ({} bytes is not a multiple of {})",
                path.display(),
                file_len,
                record_size
            );
            return Err(JournalError::Corrupt(format!(
                "{}: length {} is not a multiple of record size {}",
                path.display(),
                file_len,
                record_size
            )));
        }

        let entry_count = file_len / record_size;
        tracing::debug!(
            "journal: opened {} with {} entries",
            path.display(),
            entry_count
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            entry_count,
            config,
        })
    }

    /// Append one page record to the end of the journal
    ///
    /// Not durable until `sync` returns. If the write fails the file may hold
    /// a partial record, which the next `open` rejects as corrupt.
    pub fn append(&mut self, entry: &JournalEntry) -> Result<()> {
        let record = entry.encode(self.config.page_size)?;

        self.file
            .seek(SeekFrom::End(0))
            .and_then(|_| self.file.write_all(&record))
            .map_err(|e| {
                tracing::error!(
                    "journal: failed to append page {} to {}: {}",
                    entry.page_index,
                    self.path.display(),
                    e
                );
                e
            })?;

        self.entry_count += 1;
        Ok(())
    }

    /// Flush every appended record to stable storage
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all().map_err(|e| {
            tracing::error!(
                "journal: failed to flush changes to {}: {}",
                self.path.display(),
                e
            );
            e.into()
        })
    }

    /// Iterate over the stored records in append order
    pub fn entries(&mut self) -> Result<JournalIterator<'_>> {
        Ok(self.reader()?.entries())
    }

    /// Sequential reader positioned at the first record
    pub fn reader(&mut self) -> Result<JournalReader<'_>> {
        let path = &self.path;
        JournalReader::new(&mut self.file, self.config.page_size, self.entry_count).map_err(|e| {
            tracing::error!(
                "journal: failed to seek to beginning of {}: {}",
                path.display(),
                e
            );
            e
        })
    }

    /// Replay every record into `target`, returning how many were written
    ///
    /// Each record overwrites its whole page, so a replay that failed part
    /// way can simply be run again. When several records name the same page
    /// the last one appended wins. The journal itself is left untouched.
    pub fn apply<W: Write + Seek>(&mut self, target: &mut W) -> Result<u64> {
        if self.entry_count == 0 {
            return Ok(0);
        }

        let page_size = self.config.page_size;
        let path = self.path.clone();
        tracing::debug!(
            "journal: applying {} entries from {}",
            self.entry_count,
            path.display()
        );

        let mut applied = 0u64;
        for entry in self.entries()? {
            let entry = entry?;
            let offset = entry.target_offset(page_size)?;

            target.seek(SeekFrom::Start(offset)).map_err(|e| {
                tracing::error!(
                    "journal: failed to seek to offset {} while applying {}: {}",
                    offset,
                    path.display(),
                    e
                );
                e
            })?;
            target.write_all(&entry.page_bytes)?;
            applied += 1;
        }

        tracing::debug!("journal: applied {} entries from {}", applied, path.display());
        Ok(applied)
    }

    /// Close the handle and delete the backing file
    ///
    /// Only call once the contents have been applied and the target synced.
    /// A failed delete is reported as `Fatal`.
    pub fn destroy(self) -> Result<()> {
        let Journal { path, file, .. } = self;
        drop(file);

        fs::remove_file(&path).map_err(|e| {
            tracing::error!("journal: failed to remove {}: {}", path.display(), e);
            JournalError::Fatal(format!("failed to remove {}: {}", path.display(), e))
        })?;

        tracing::debug!("journal: destroyed {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of complete records in the journal
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Size of one on-disk record
    pub fn record_size(&self) -> u64 {
        self.config.record_size()
    }
}
