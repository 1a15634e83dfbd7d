//! Client-side persisted state
//!
//! One typed store replaces scattered key/value reads: the preferences blob
//! is loaded through a [`StorageBackend`] handed in by the caller.

use std::path::PathBuf;

use crate::error::AppResult;

pub mod preferences;

pub use preferences::{DataExport, Preferences, PreferencesStore};

/// Where the serialized preferences blob lives
pub trait StorageBackend: Send {
    /// Returns `None` when nothing has been stored yet
    fn read(&self) -> AppResult<Option<String>>;

    fn write(&mut self, contents: &str) -> AppResult<()>;

    fn clear(&mut self) -> AppResult<()>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for FileStorage {
    fn read(&self) -> AppResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile storage for tests and short-lived sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self) -> AppResult<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> AppResult<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.contents = None;
        Ok(())
    }
}
