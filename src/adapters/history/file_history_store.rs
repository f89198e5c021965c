//! File-backed history store.
//!
//! The history lives in a single text file, one record per line. Before each
//! save the previous file is copied to `<stem>_bk<YYYY-MM-DD>.txt` next to
//! it, so one backup per day survives a bad run.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::history::{History, HISTORY_DATE_FORMAT};
use crate::ports::{HistoryStore, StorageError};

/// History stored in a plain text file
pub struct FileHistoryStore {
    path: PathBuf,
    backup_date: Option<NaiveDate>,
}

impl FileHistoryStore {
    /// Create a store for `path`; the file need not exist yet
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            backup_date: None,
        }
    }

    /// Pin the date used in backup file names instead of today's date
    pub fn with_backup_date(mut self, date: NaiveDate) -> Self {
        self.backup_date = Some(date);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the backup written by a save on `date`
    pub fn backup_path(&self, date: NaiveDate) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "history".to_string());
        let name = format!("{}_bk{}.txt", stem, date.format(HISTORY_DATE_FORMAT));
        self.path.with_file_name(name)
    }

    async fn ensure_dir_exists(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StorageError::IoError(format!("Failed to create directory: {}", e))
                })?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<History, StorageError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No history file yet, starting empty");
            return Ok(History::empty());
        }

        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to read history: {}", e)))?;

        let history = History::parse(&text)?;
        tracing::debug!(records = history.len(), "Loaded history");
        Ok(history)
    }

    async fn save(&self, history: &History) -> Result<(), StorageError> {
        self.ensure_dir_exists().await?;

        if self.path.exists() {
            let date = self.backup_date.unwrap_or_else(|| Local::now().date_naive());
            let backup = self.backup_path(date);
            fs::copy(&self.path, &backup)
                .await
                .map_err(|e| StorageError::IoError(format!("Failed to write backup: {}", e)))?;
            tracing::debug!(backup = %backup.display(), "Backed up history");
        }

        // Write via a temporary file so a failed write never truncates the history
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, history.to_text()).await.map_err(|e| {
            StorageError::IoError(format!("Failed to write temporary file: {}", e))
        })?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to rename file: {}", e)))?;

        tracing::info!(path = %self.path.display(), records = history.len(), "Saved history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_WEEKS: &str = "2020-04-06,AB:Dishes,CD:Wild\n2020-04-13,AB:Wild,CD:Dishes\n";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, HISTORY_DATE_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(temp_dir.path().join("history.txt"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_preserves_file_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.txt");
        std::fs::write(&path, TWO_WEEKS).unwrap();
        let store = FileHistoryStore::new(&path).with_backup_date(date("2020-04-13"));

        let history = store.load().await.unwrap();
        store.save(&history).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), TWO_WEEKS);
    }

    #[tokio::test]
    async fn save_keeps_dated_backup_of_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.txt");
        std::fs::write(&path, TWO_WEEKS).unwrap();
        let store = FileHistoryStore::new(&path).with_backup_date(date("2020-04-14"));

        store.save(&History::empty()).await.unwrap();

        let backup = temp_dir.path().join("history_bk2020-04-14.txt");
        assert_eq!(store.backup_path(date("2020-04-14")), backup);
        assert_eq!(std::fs::read_to_string(backup).unwrap(), TWO_WEEKS);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn first_save_writes_no_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("history.txt");
        let store = FileHistoryStore::new(&path).with_backup_date(date("2020-04-14"));

        store.save(&History::parse(TWO_WEEKS).unwrap()).await.unwrap();

        assert!(path.exists());
        assert!(!store.backup_path(date("2020-04-14")).exists());
    }

    #[tokio::test]
    async fn malformed_file_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.txt");
        std::fs::write(&path, "2020-04-06,AB:Dishes\ngarbage\n").unwrap();

        let err = FileHistoryStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
