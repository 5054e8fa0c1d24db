//! Page Journal Module
//!
//! Redo log for a fixed-page-size data file.
//!
//! ## Responsibilities
//! - Append full page images before they reach the data file
//! - fsync as the durability boundary
//! - Replay records into the data file in append order
//! - Reject files holding a partial trailing record
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Entry 1                                 │
//! │ ┌────────────────┬────────────────────┐ │
//! │ │ Page Index (8) │ Page (page_size)   │ │
//! │ └────────────────┴────────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Entry 2                                 │
//! │ ┌────────────────┬────────────────────┐ │
//! │ │ Page Index (8) │ Page (page_size)   │ │
//! │ └────────────────┴────────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! No header, footer or checksum. The page index is in native byte order,
//! and the file length is always a whole number of records.

mod entry;
mod file;
mod reader;
mod recovery;

pub use entry::{record_size, JournalEntry, INDEX_SIZE, MAX_FILE_OFFSET};
pub use file::Journal;
pub use reader::{JournalIterator, JournalReader};
pub use recovery::{JournalRecovery, JournalStats, RecoveryResult};
