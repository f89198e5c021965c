//! Situation Prompter Port - asks who is away and what is skipped this week.

use crate::domain::assignment::RosterError;
use crate::domain::foundation::{AgentId, ItemId};

/// Errors from the prompting collaborator itself, as opposed to bad answers
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt failed: {0}")]
    Io(String),

    #[error("No more answers available")]
    Exhausted,
}

/// Port for eliciting the period's situation
///
/// Answers are raw names; validating them is the caller's job.
pub trait SituationPrompter {
    /// Ask which agents are absent this period
    fn ask_absent(&mut self, agents: &[AgentId]) -> Result<Vec<String>, PromptError>;

    /// Ask which items to skip, given how many must be skipped
    fn ask_skipped(&mut self, required: usize, items: &[ItemId])
        -> Result<Vec<String>, PromptError>;

    /// Tell the user why their answer was rejected
    fn reject(&mut self, problem: &RosterError) -> Result<(), PromptError>;
}
