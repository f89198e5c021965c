//! Assignment and roster errors.

use thiserror::Error;

use crate::domain::foundation::AgentId;

/// Errors raised when constructing an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("{agents} agents cannot be paired with {items} items")]
    LengthMismatch { agents: usize, items: usize },

    #[error("Agent '{0}' appears more than once")]
    DuplicateAgent(AgentId),
}

/// User-input errors raised while reconciling who is present and what is needed.
///
/// None of these are fatal to the rota: the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Who is '{0}'?")]
    UnknownAgent(String),

    #[error("What is '{0}'?")]
    UnknownItem(String),

    #[error("'{0}' was listed more than once")]
    DuplicateEntry(String),

    #[error("Must skip exactly {expected} items, got {actual}")]
    WrongSkipCount { expected: usize, actual: usize },

    #[error("Nobody is present")]
    NobodyPresent,

    #[error("Placeholder '{0}' has no preference row, cannot pad the item list")]
    PlaceholderMissing(String),
}
