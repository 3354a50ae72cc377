//! File source and sink errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading or writing CSV files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A required column is absent from the header row.
    #[error("{} has no '{column}' column", path.display())]
    MissingColumn {
        /// File being read.
        path: PathBuf,
        /// Column that was expected.
        column: String,
    },

    /// A row could not be interpreted.
    #[error("{}:{line}: {reason}", path.display())]
    InvalidRecord {
        /// File being read.
        path: PathBuf,
        /// One-based line number.
        line: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader or writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FileError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(path: impl AsRef<Path>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            path: path.as_ref().to_path_buf(),
            column: column.into(),
        }
    }
}

/// Result type alias for file operations.
pub type FileResult<T> = Result<T, FileError>;
