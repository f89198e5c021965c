//! Filesystem output writer.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{OutputWriter, WriteError};

/// Writes documents to the local filesystem, creating parent directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOutputWriter;

impl FileOutputWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputWriter for FileOutputWriter {
    async fn write(&self, path: &Path, content: &str) -> Result<PathBuf, WriteError> {
        let fail = |e: std::io::Error| WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(fail)?;
            }
        }
        fs::write(path, content).await.map_err(fail)?;

        Ok(path.to_path_buf())
    }
}
