//! Persistence backends for the record store.
//!
//! The store only ever reads or writes the whole serialized directory, so a
//! backend is a single text slot: [`FileBackend`] for the real backing file,
//! [`MemoryBackend`] for tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Whole-document storage for the serialized directory.
pub trait StorageBackend {
    /// Reads the stored document.
    ///
    /// Returns `Ok(None)` when the storage does not exist yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored document.
    fn save(&mut self, contents: &str) -> Result<()>;

    /// Location used in logs and error messages.
    fn location(&self) -> &Path;
}

// ============================================================================
// FileBackend
// ============================================================================

/// Backing file on the local filesystem.
///
/// Saves go through a temporary file in the target directory which is then
/// renamed over the backing file, so a crash mid-write never leaves a
/// truncated document behind. The file keeps its existing permissions.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates a backend for the given file path. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_with_path(e, &self.path)),
        }
    }

    fn save(&mut self, contents: &str) -> Result<()> {
        let dir = self.parent_dir();
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;
        }

        let existing = match std::fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::io_with_path(e, &self.path)),
        };

        // A fresh file gets the same mode a plain create would (umask applies).
        let mut builder = tempfile::Builder::new();
        if let (None, Some(permissions)) = (&existing, create_permissions()) {
            builder.permissions(permissions);
        }
        let mut tmp = builder
            .tempfile_in(dir)
            .map_err(|e| Error::io_with_path(e, dir))?;
        if let Some(permissions) = existing {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| Error::io_with_path(e, tmp.path()))?;
        }
        tmp.write_all(contents.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| Error::io_with_path(e, tmp.path()))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::io_with_path(e.error, &self.path))?;
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn create_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn create_permissions() -> Option<std::fs::Permissions> {
    None
}

// ============================================================================
// MemoryBackend
// ============================================================================

/// In-memory document slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Option<String>,
    saves: usize,
}

impl MemoryBackend {
    /// Creates an empty backend, equivalent to a missing backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-filled with a document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            saves: 0,
        }
    }

    /// Current stored document.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of saves performed so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> Result<()> {
        self.contents = Some(contents.to_string());
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> &Path {
        Path::new("<memory>")
    }
}
