//! Preference sheet configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::preferences::DEFAULT_PLACEHOLDER;

use super::error::ValidationError;

/// Where the preference sheet comes from
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    /// Published tab-separated export URL
    pub url: Option<String>,

    /// Local tab-separated file, used instead of `url` when set
    pub path: Option<PathBuf>,

    /// Name of the row holding placeholder costs
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Link to the editable sheet shown in the announcement
    pub sheet_link: Option<String>,
}

/// Resolved preference location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceLocation {
    Url(String),
    File(PathBuf),
}

impl PreferencesConfig {
    /// The configured location; a local file wins over a URL
    pub fn location(&self) -> Option<PreferenceLocation> {
        match (&self.path, &self.url) {
            (Some(path), _) => Some(PreferenceLocation::File(path.clone())),
            (None, Some(url)) => Some(PreferenceLocation::Url(url.clone())),
            (None, None) => None,
        }
    }

    /// Link for humans to edit their preferences.
    ///
    /// Falls back to the export URL with its `/export?...` suffix removed.
    pub fn editable_link(&self) -> Option<String> {
        if let Some(link) = &self.sheet_link {
            return Some(link.clone());
        }
        self.url
            .as_ref()
            .map(|url| match url.split_once("/export?") {
                Some((sheet, _)) => sheet.to_string(),
                None => url.clone(),
            })
    }

    /// Validate preference configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.location().is_none() {
            return Err(ValidationError::MissingRequired("preferences.url or preferences.path"));
        }
        if let Some(url) = &self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl(url.clone()));
            }
        }
        if self.placeholder.trim().is_empty() {
            return Err(ValidationError::EmptyPlaceholder);
        }
        Ok(())
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            url: None,
            path: None,
            placeholder: default_placeholder(),
            sheet_link: None,
        }
    }
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "https://docs.google.com/spreadsheets/d/abc/export?format=tsv";

    #[test]
    fn test_defaults_need_a_location() {
        let config = PreferencesConfig::default();
        assert_eq!(config.placeholder, "Wild");
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("preferences.url or preferences.path"))
        );
    }

    #[test]
    fn test_path_wins_over_url() {
        let config = PreferencesConfig {
            url: Some(EXPORT.to_string()),
            path: Some(PathBuf::from("prefs.tsv")),
            ..Default::default()
        };
        assert_eq!(
            config.location(),
            Some(PreferenceLocation::File(PathBuf::from("prefs.tsv")))
        );
    }

    #[test]
    fn test_editable_link_strips_export_suffix() {
        let config = PreferencesConfig {
            url: Some(EXPORT.to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.editable_link().as_deref(),
            Some("https://docs.google.com/spreadsheets/d/abc")
        );

        let config = PreferencesConfig {
            sheet_link: Some("https://example.com/edit".to_string()),
            ..config
        };
        assert_eq!(config.editable_link().as_deref(), Some("https://example.com/edit"));
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = PreferencesConfig {
            url: Some("ftp://example.com/sheet".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidUrl(_))));
    }

    #[test]
    fn test_validation_rejects_blank_placeholder() {
        let config = PreferencesConfig {
            path: Some(PathBuf::from("prefs.tsv")),
            placeholder: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyPlaceholder));
    }
}
