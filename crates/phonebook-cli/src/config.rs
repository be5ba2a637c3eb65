//! Runtime configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an
//! optional TOML file, then command-line flags or their environment
//! variables. With nothing supplied the phonebook uses
//! `phone_book_data.json` in the working directory and pages of five.
//!
//! ```toml
//! data_file = "contacts.json"
//! page_size = 10
//! ```

use std::path::{Path, PathBuf};

use phonebook_core::{DEFAULT_PAGE_SIZE, Error, Result};
use serde::Deserialize;

/// Backing file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "phone_book_data.json";

/// Resolved phonebook settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backing JSON file.
    pub data_file: PathBuf,
    /// Contacts per listing page.
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load from an optional TOML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply flag values on top of this configuration.
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, page_size: Option<usize>) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        if let Some(page_size) = page_size {
            self.page_size = page_size;
        }
        self
    }

    /// Reject settings the shell cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(Error::config("data_file must not be empty"));
        }
        Ok(())
    }
}
