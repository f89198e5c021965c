//! In-Memory History Store Adapter
//!
//! Keeps the history in memory. Useful for testing and dry runs.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::history::History;
use crate::ports::{HistoryStore, StorageError};

/// In-memory storage for the assignment history
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    history: Arc<RwLock<History>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `history`
    pub fn with_history(history: History) -> Self {
        Self {
            history: Arc::new(RwLock::new(history)),
            saves: Arc::default(),
        }
    }

    /// Snapshot of the current history
    pub async fn snapshot(&self) -> History {
        self.history.read().await.clone()
    }

    /// Number of completed saves
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<History, StorageError> {
        Ok(self.history.read().await.clone())
    }

    async fn save(&self, history: &History) -> Result<(), StorageError> {
        *self.history.write().await = history.clone();
        *self.saves.write().await += 1;
        Ok(())
    }
}
