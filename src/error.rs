//! Error types for pagejournal
//!
//! Splits failures into caller bugs, I/O faults, corruption and
//! unrecoverable environment faults. Recovery code branches on the kind.

use thiserror::Error;

/// Result type alias using JournalError
pub type Result<T> = std::result::Result<T, JournalError>;

/// Unified error type for journal operations
#[derive(Debug, Error)]
pub enum JournalError {
    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    /// Bad path, bad page size or malformed entry. Nothing was changed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// Any failed open/read/write/seek/fsync. State may be partially advanced.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Journal Errors
    // -------------------------------------------------------------------------
    /// The journal file cannot be trusted and must be discarded.
    #[error("Journal corruption detected: {0}")]
    Corrupt(String),

    /// Teardown failed; the environment is in an unknown state.
    #[error("Fatal journal error: {0}")]
    Fatal(String),
}

impl JournalError {
    /// Whether the caller may retry the failed operation as-is
    ///
    /// Only I/O failures qualify: argument errors will fail the same way
    /// again, and corrupt or fatal journals need out-of-band handling.
    pub fn is_retryable(&self) -> bool {
        matches!(self, JournalError::Io(_))
    }
}
