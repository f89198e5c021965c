//! Preference source adapters.

mod file_source;
mod http_source;

pub use file_source::FilePreferenceSource;
pub use http_source::HttpPreferenceSource;
