//! Preference table errors.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors raised while loading or querying the preference table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreferenceError {
    #[error("Preference table has no header row")]
    MissingHeader,

    #[error("Preference table lists no agents")]
    NoAgents,

    #[error("Cost of '{item}' for '{agent}' is {value}, must be within [1, {max}]")]
    OutOfRange {
        agent: String,
        item: String,
        value: f64,
        max: usize,
    },

    #[error("Cost of '{item}' for '{agent}' is not a number: '{raw}'")]
    NotANumber {
        agent: String,
        item: String,
        raw: String,
    },

    #[error("Item '{item}' has {actual} costs but {expected} agents are listed")]
    MissingCost {
        item: String,
        expected: usize,
        actual: usize,
    },

    #[error("Agent '{0}' is listed more than once")]
    DuplicateAgent(String),

    #[error("Item '{0}' is listed more than once")]
    DuplicateItem(String),

    #[error("Unknown agent '{0}'")]
    UnknownAgent(String),

    #[error("Unknown item '{0}'")]
    UnknownItem(String),

    #[error(transparent)]
    InvalidId(#[from] ValidationError),
}
