//! # pagejournal
//!
//! A crash-consistent redo journal for fixed-page-size storage files:
//! - Full page images appended as fixed-size records
//! - fsync as the durability boundary
//! - Idempotent, last-write-wins replay into the main data file
//! - Corruption detection through record alignment
//!
//! ## Protocol Overview
//!
//! ```text
//!   page store                 journal                   data file
//!   ──────────                 ───────                   ─────────
//!   modify page ──append──▶ [idx|page][idx|page]...
//!   commit      ──sync────▶   fsync(journal)
//!   checkpoint  ──apply───▶   read records ──seek/write──▶ idx * page_size
//!               ──sync data file──────────────────────────▶ fsync(data)
//!               ──destroy─▶   unlink(journal)
//! ```
//!
//! A crash anywhere before `destroy` leaves the journal on disk;
//! [`JournalRecovery::recover`] replays it on the next start.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod journal;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{JournalError, Result};
pub use config::JournalConfig;
pub use journal::{Journal, JournalEntry, JournalRecovery};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pagejournal
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
