//! File preference source, for offline runs and tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{PreferenceSource, SourceError};

/// Reads the preference sheet from a local tab-separated file.
pub struct FilePreferenceSource {
    path: PathBuf,
}

impl FilePreferenceSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PreferenceSource for FilePreferenceSource {
    async fn fetch_table(&self) -> Result<String, SourceError> {
        fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
