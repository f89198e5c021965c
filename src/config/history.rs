//! History file configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the assignment history is kept
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("history"));
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("history.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        assert_eq!(HistoryConfig::default().path, PathBuf::from("history.txt"));
        assert!(HistoryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let config = HistoryConfig {
            path: PathBuf::new(),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyPath("history")));
    }
}
