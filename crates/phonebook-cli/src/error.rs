//! Error types for phonebook-cli

use thiserror::Error;

/// Result type alias for phonebook-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in phonebook-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from phonebook-core
    #[error("Core error: {0}")]
    Core(#[from] phonebook_core::Error),

    /// Reading from or writing to the terminal failed
    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),
}
