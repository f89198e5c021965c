//! Rotation errors.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::assignment::AssignmentError;

/// Errors raised while building a continuation baseline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaselineError {
    /// No record at the cycle's opening date. Recoverable: seed a fresh cycle instead.
    #[error("No history record for cycle start {0}")]
    NotFound(NaiveDate),

    #[error("Ran out of unassigned items while carrying over the cycle baseline")]
    ItemsExhausted,

    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

impl BaselineError {
    /// Returns true for the one fault that callers recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BaselineError::NotFound(_))
    }
}

/// Errors raised by calendar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Cycle length must be at least one period")]
    ZeroCycleLength,
}
