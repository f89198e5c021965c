//! History errors.

use thiserror::Error;

/// Errors raised while parsing history text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Malformed history line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl HistoryError {
    /// Creates a malformed line error. `line` is 1-based.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        HistoryError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
