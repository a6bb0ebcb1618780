//! Document storage over the filesystem.
//!
//! One `DocumentStore` is bound to one target file, the way a file picker
//! binds a browser session to one handle. Failures are surfaced, never
//! retried; the in-memory document stays the source of truth until the
//! next successful save or reload.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by the storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No document at the target path
    #[error("Document not found")]
    NotFound,

    /// The target exists but cannot be read or written
    #[error("Access denied")]
    AccessDenied,

    /// The operation was interrupted before completing
    #[error("Operation cancelled")]
    Cancelled,

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound,
            io::ErrorKind::PermissionDenied => StorageError::AccessDenied,
            io::ErrorKind::Interrupted => StorageError::Cancelled,
            _ => StorageError::Io(err),
        }
    }
}

/// Reads and writes the shared document at a fixed path.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw document text
    pub async fn load(&self) -> Result<String, StorageError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    /// Write the document text, replacing the previous contents.
    ///
    /// At most one save may be in flight per document; the session
    /// guarantees this by not reading the next command until the await
    /// completes.
    pub async fn save(&self, text: &str) -> Result<(), StorageError> {
        Ok(tokio::fs::write(&self.path, text).await?)
    }
}
