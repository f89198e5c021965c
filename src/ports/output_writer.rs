//! Output Writer Port - where rendered documents go.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Errors that can occur while writing output documents
#[derive(Debug, thiserror::Error)]
#[error("Failed to write {path}: {message}")]
pub struct WriteError {
    pub path: String,
    pub message: String,
}

/// Port for persisting rendered documents
#[async_trait]
pub trait OutputWriter: Send + Sync {
    /// Write `content` to `path`, replacing any previous document
    ///
    /// # Returns
    /// The path actually written
    async fn write(&self, path: &Path, content: &str) -> Result<PathBuf, WriteError>;
}
