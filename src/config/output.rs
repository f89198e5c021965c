//! Output document configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the announcement and chart are written, and how the announcement is signed
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_notification_path")]
    pub notification_path: PathBuf,

    #[serde(default = "default_chart_path")]
    pub chart_path: PathBuf,

    #[serde(default = "default_sign_off")]
    pub sign_off: String,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.notification_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("notification"));
        }
        if self.chart_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("chart"));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            notification_path: default_notification_path(),
            chart_path: default_chart_path(),
            sign_off: default_sign_off(),
        }
    }
}

fn default_notification_path() -> PathBuf {
    PathBuf::from("email.html")
}

fn default_chart_path() -> PathBuf {
    PathBuf::from("misery.svg")
}

fn default_sign_off() -> String {
    "House Manager".to_string()
}
