//! Error types for the phonebook core library.

use std::path::{Path, PathBuf};

/// Why a record selection was rejected.
///
/// Both faults are reported to the user with the same combined message;
/// the distinction is kept for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionFault {
    /// The 1-based index is zero or past the end of the directory.
    IndexOutOfRange {
        /// Requested 1-based index
        index: usize,
        /// Number of records in the directory
        len: usize,
    },

    /// The field name does not normalize to any schema field.
    UnknownField {
        /// Field name as typed by the user
        name: String,
    },
}

impl std::fmt::Display for SelectionFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionFault::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is outside 1..={len}")
            }
            SelectionFault::UnknownField { name } => write!(f, "unknown field '{name}'"),
        }
    }
}

/// Errors that can occur while loading, saving, or editing the directory.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure on the backing storage
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path of the file being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The backing storage exists but does not hold a valid contact list
    #[error("Corrupt contact data in {}: {source}", .path.display())]
    CorruptData {
        /// Path of the offending file
        path: PathBuf,
        /// Parse failure reported by the JSON decoder
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Out-of-range record index or unrecognized field name
    #[error("Invalid index or field: {reason}")]
    InvalidSelection {
        /// Which part of the selection was rejected
        reason: SelectionFault,
    },

    /// Non-integer input where a record index was expected
    #[error("Expected a number, got '{input}'")]
    NonNumericInput {
        /// Raw input text
        input: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for phonebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error came from user input rather than storage.
    ///
    /// User errors are reported and the current action is aborted; anything
    /// else has no recovery path.
    pub fn is_user_error(&self) -> bool {
        match self {
            Error::InvalidSelection { .. } => true,
            Error::NonNumericInput { .. } => true,
            Error::Io { .. } => false,
            Error::CorruptData { .. } => false,
            Error::Serialization(_) => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates an I/O error tagged with the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a corrupt-data error for the given backing file.
    pub fn corrupt(source: serde_json::Error, path: impl AsRef<Path>) -> Self {
        Error::CorruptData {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an out-of-range selection error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::InvalidSelection {
            reason: SelectionFault::IndexOutOfRange { index, len },
        }
    }

    /// Creates an unknown-field selection error.
    pub fn unknown_field<S: Into<String>>(name: S) -> Self {
        Error::InvalidSelection {
            reason: SelectionFault::UnknownField { name: name.into() },
        }
    }

    /// Creates a non-numeric input error.
    pub fn non_numeric<S: Into<String>>(input: S) -> Self {
        Error::NonNumericInput {
            input: input.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
