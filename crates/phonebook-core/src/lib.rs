#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Phonebook Core Library
//!
//! Field schema, contact records, the file-backed record store, and the
//! field-generic directory operations layered on it.

pub mod backend;
pub mod contact;
pub mod directory;
pub mod error;
mod proptests;
pub mod schema;
pub mod store;

// Re-exports for convenience
pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use contact::Contact;
pub use directory::{DEFAULT_PAGE_SIZE, Page, Pages, display_contact};
pub use error::{Error, Result, SelectionFault};
pub use schema::{Field, field_list};
pub use store::{LoadOutcome, Store};
