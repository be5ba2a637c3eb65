//! # phonebook-cli
//!
//! Text-menu front end for the phonebook contact directory.
//!
//! This crate provides:
//! - Command-line and TOML configuration
//! - A line-oriented console capability (real terminal or scripted)
//! - The menu shell: list, add, edit, search, exit

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod shell;

pub use error::{Error, Result};
