//! Exchange errors.

use thiserror::Error;

use crate::domain::assignment::AssignmentError;
use crate::domain::foundation::AgentId;
use crate::domain::preferences::PreferenceError;

/// Errors raised while searching for or applying exchanges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    #[error("Agent '{0}' is not part of the assignment")]
    AgentNotAssigned(AgentId),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}
