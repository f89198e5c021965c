//! History Store Port - Interface for persisting assignment history.

use async_trait::async_trait;

use crate::domain::history::{History, HistoryError};

/// Errors that can occur during history storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("History is corrupt: {0}")]
    Corrupt(#[from] HistoryError),
}

/// Port for loading and saving the full history
///
/// The history is small, so it is always read and written whole.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the history
    ///
    /// # Returns
    /// An empty history if nothing has been saved yet
    ///
    /// # Errors
    /// Returns `StorageError::Corrupt` if any stored line is malformed
    async fn load(&self) -> Result<History, StorageError>;

    /// Replace the stored history
    ///
    /// # Errors
    /// Returns `StorageError` if the write fails
    async fn save(&self, history: &History) -> Result<(), StorageError>;
}
