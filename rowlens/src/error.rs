//! Error types for the rowlens profiling library.
//!
//! This module provides a comprehensive error handling strategy using `thiserror`
//! for automatic error trait implementations. All errors in the rowlens
//! library are represented by the `ProfileError` enum.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the rowlens library.
///
/// This enum represents all possible errors that can occur while loading
/// datasets and computing profiles.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Error when an input file does not exist.
    ///
    /// Reported distinctly from other I/O failures so callers can skip the
    /// file with a targeted message and keep processing the rest.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path that could not be found
        path: PathBuf,
    },

    /// Error from I/O operations other than a missing file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV decoding.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error when one or more requested columns are absent from the headers.
    ///
    /// Carries every absent name so a single failure reports the full set.
    #[error("Missing columns: {}", .columns.join(", "))]
    MissingColumns {
        /// All requested column names that were not found
        columns: Vec<String>,
    },

    /// Error when a row's width does not match the header count.
    #[error("Row {row} has {found} values, expected {expected}")]
    InvalidRow {
        /// Zero-based row index within the data rows
        row: usize,
        /// Number of header columns
        expected: usize,
        /// Number of values the row actually carried
        found: usize,
    },

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ProfileError>`.
///
/// This is the standard `Result` type used throughout the rowlens library.
///
/// # Examples
///
/// ```rust
/// use rowlens::error::Result;
///
/// fn prepare() -> Result<()> {
///     // profiling logic here
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates a new file-not-found error for the given path.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a new missing-columns error from any collection of names.
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a new invalid-row error.
    pub fn invalid_row(row: usize, expected: usize, found: usize) -> Self {
        Self::InvalidRow {
            row,
            expected,
            found,
        }
    }

    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true when this error is the missing-file kind.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ProfileError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            match base_error {
                ProfileError::Internal(inner) => {
                    ProfileError::Internal(format!("{}: {}", msg, inner))
                }
                other => ProfileError::Internal(format!("{}: {}", msg, other)),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            let base_error = e.into();
            match base_error {
                ProfileError::Internal(inner) => {
                    ProfileError::Internal(format!("{}: {}", msg, inner))
                }
                other => ProfileError::Internal(format!("{}: {}", msg, other)),
            }
        })
    }
}
