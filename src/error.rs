// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for region persistence operations.
//!
//! Corrupt or truncated autosave files are deliberately NOT an error
//! variant: backup discovery is best-effort, and unreadable snapshots are
//! skipped by returning `None` rather than failing the whole scan.

use thiserror::Error;

/// Result type for region persistence operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the region persistence core.
#[derive(Debug, Error)]
pub enum Error {
    /// A CSV data row had fewer than four fields or a field that is not
    /// a non-negative integer. The whole decode fails; no partial region
    /// list is produced.
    #[error("malformed CSV row at line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    /// An operation was invoked in a state that does not permit it
    /// (for example loading region data before an image is present).
    /// No state change has occurred.
    #[error("operation not permitted: {0}")]
    PreconditionFailed(String),

    /// A table edit addressed a row or column outside the current bounds.
    /// No mutation was performed.
    #[error("invalid table index: row {row}, column {column}")]
    InvalidIndex { row: usize, column: usize },

    /// An underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
