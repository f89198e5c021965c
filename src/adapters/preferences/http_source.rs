//! HTTP preference source.
//!
//! Fetches the sheet from a published tab-separated export URL.

use async_trait::async_trait;
use std::time::Duration;

use crate::ports::{PreferenceSource, SourceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Preference source backed by a published spreadsheet export.
pub struct HttpPreferenceSource {
    url: String,
    http_client: reqwest::Client,
}

impl HttpPreferenceSource {
    /// Create a source for `url`.
    ///
    /// Nothing is fetched until `fetch_table` is called.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let url = url.into();
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Request {
                url: url.clone(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { url, http_client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PreferenceSource for HttpPreferenceSource {
    async fn fetch_table(&self) -> Result<String, SourceError> {
        tracing::debug!("Fetching preferences from {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch preferences: {}", e);
                SourceError::Request {
                    url: self.url.clone(),
                    message: e.to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Preference sheet returned {}", status);
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| SourceError::Request {
            url: self.url.clone(),
            message: format!("Failed to read body: {}", e),
        })?;

        tracing::debug!(bytes = text.len(), "Fetched preference sheet");
        Ok(text)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
