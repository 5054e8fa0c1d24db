//! Journal Entry definitions
//!
//! A record is the page index followed by the full page image.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{JournalError, Result};

/// Width of the page index field (u64, native byte order)
pub const INDEX_SIZE: usize = std::mem::size_of::<u64>();

/// Largest byte offset a file can be seeked to (off_t is signed)
pub const MAX_FILE_OFFSET: u64 = i64::MAX as u64;

/// Size of one on-disk record for the given page size
///
/// Saturates instead of overflowing; such page sizes fail config validation.
pub fn record_size(page_size: usize) -> usize {
    INDEX_SIZE.saturating_add(page_size)
}

/// A single modified page, as logged in the journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// Index of the page in the main data file
    pub page_index: u64,

    /// Full page image; must be exactly one page long
    pub page_bytes: Bytes,
}

impl JournalEntry {
    pub fn new(page_index: u64, page_bytes: impl Into<Bytes>) -> Self {
        Self {
            page_index,
            page_bytes: page_bytes.into(),
        }
    }

    /// Byte offset of this page in the main data file
    ///
    /// The whole page must end at or below `MAX_FILE_OFFSET`; anything past
    /// it can never be written, so it is reported as `Corrupt`.
    pub fn target_offset(&self, page_size: usize) -> Result<u64> {
        let page_size = page_size as u64;
        self.page_index
            .checked_mul(page_size)
            .filter(|offset| {
                offset
                    .checked_add(page_size)
                    .is_some_and(|end| end <= MAX_FILE_OFFSET)
            })
            .ok_or_else(|| {
                JournalError::Corrupt(format!(
                    "page index {} overflows file offset at page size {}",
                    self.page_index, page_size
                ))
            })
    }

    /// Encode into a record: [page_index (8, native)][page bytes (page_size)]
    pub fn encode(&self, page_size: usize) -> Result<Bytes> {
        if self.page_bytes.len() != page_size {
            return Err(JournalError::InvalidArgument(format!(
                "entry for page {} has {} bytes, expected {}",
                self.page_index,
                self.page_bytes.len(),
                page_size
            )));
        }

        let mut buf = BytesMut::with_capacity(record_size(page_size));
        buf.put_slice(&self.page_index.to_ne_bytes());
        buf.put_slice(&self.page_bytes);
        Ok(buf.freeze())
    }

    /// Decode a record produced by `encode`
    pub fn decode(record: &[u8], page_size: usize) -> Result<Self> {
        if record.len() != record_size(page_size) {
            return Err(JournalError::Corrupt(format!(
                "record is {} bytes, expected {}",
                record.len(),
                record_size(page_size)
            )));
        }

        let mut index = [0u8; INDEX_SIZE];
        index.copy_from_slice(&record[..INDEX_SIZE]);

        Ok(Self {
            page_index: u64::from_ne_bytes(index),
            page_bytes: Bytes::copy_from_slice(&record[INDEX_SIZE..]),
        })
    }
}
