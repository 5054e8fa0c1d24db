//! Configuration for pagejournal
//!
//! The page size belongs to the embedding storage engine; the journal only
//! uses it for record sizing and offset arithmetic.

use crate::error::{JournalError, Result};
use crate::journal::{record_size, INDEX_SIZE, MAX_FILE_OFFSET};

/// Default page size in bytes
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Configuration for a journal instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalConfig {
    /// Fixed byte length of one page in the main data file.
    /// Every record carries exactly this many bytes of page content.
    pub page_size: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl JournalConfig {
    /// Create a new config builder
    pub fn builder() -> JournalConfigBuilder {
        JournalConfigBuilder::default()
    }

    /// Size of one on-disk record: page index followed by the page
    ///
    /// Saturates for page sizes `validate` rejects.
    pub fn record_size(&self) -> u64 {
        u64::try_from(record_size(self.page_size)).unwrap_or(u64::MAX)
    }

    /// Reject configurations the journal cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(JournalError::InvalidArgument(
                "page size must be non-zero".to_string(),
            ));
        }

        let fits = self
            .page_size
            .checked_add(INDEX_SIZE)
            .and_then(|size| u64::try_from(size).ok())
            .is_some_and(|size| size <= MAX_FILE_OFFSET);
        if !fits {
            return Err(JournalError::InvalidArgument(format!(
                "page size {} does not fit in a journal record",
                self.page_size
            )));
        }
        Ok(())
    }
}

/// Builder for JournalConfig
#[derive(Default)]
pub struct JournalConfigBuilder {
    config: JournalConfig,
}

impl JournalConfigBuilder {
    /// Set the page size (in bytes)
    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn build(self) -> JournalConfig {
        self.config
    }
}
