//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the data files
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required file does not exist
    #[error("File not found: {0:?}")]
    Missing(PathBuf),

    /// A row could not be interpreted
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// Trip names are the key of the cost file
    #[error("Duplicate trip: {0}")]
    DuplicateTrip(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
