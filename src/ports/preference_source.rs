//! Preference Source Port - Where the preference table comes from.
//!
//! Sources only fetch the raw tab-separated sheet; parsing and range
//! validation stay in the domain.

use async_trait::async_trait;

use crate::domain::preferences::{PreferenceError, PreferenceModel};

/// Errors that can occur while fetching or parsing the preference table
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Preferences(#[from] PreferenceError),
}

/// Port for retrieving the preference sheet
#[async_trait]
pub trait PreferenceSource: Send + Sync {
    /// Fetch the sheet as tab-separated text
    ///
    /// # Errors
    /// Returns `SourceError` if the sheet cannot be retrieved
    async fn fetch_table(&self) -> Result<String, SourceError>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// Fetch and parse the sheet
    ///
    /// # Arguments
    /// * `placeholder` - Name of the row holding placeholder costs
    ///
    /// # Errors
    /// Returns `SourceError::Preferences` if any cost is missing or out of range
    async fn load_model(&self, placeholder: &str) -> Result<PreferenceModel, SourceError> {
        let text = self.fetch_table().await?;
        Ok(PreferenceModel::from_tsv(&text, placeholder)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl PreferenceSource for Fixed {
        async fn fetch_table(&self) -> Result<String, SourceError> {
            Ok(self.0.to_string())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    #[tokio::test]
    async fn load_model_parses_fetched_text() {
        let source = Fixed("\tA\tB\nDishes\t1\t2\nLawn\t2\t1\n");
        let model = source.load_model("Wild").await.unwrap();
        assert_eq!(model.agents().len(), 2);
    }

    #[tokio::test]
    async fn load_model_surfaces_range_errors() {
        let source = Fixed("\tA\tB\nDishes\t1\t9\nLawn\t2\t1\n");
        let err = source.load_model("Wild").await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::Preferences(PreferenceError::OutOfRange { .. })
        ));
    }

    #[test]
    fn status_error_names_url() {
        let err = SourceError::Status {
            url: "https://example.com/sheet".to_string(),
            status: 404,
        };
        assert!(err.to_string().contains("example.com"));
        assert!(err.to_string().contains("404"));
    }
}
