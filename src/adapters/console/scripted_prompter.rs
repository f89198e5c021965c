//! Scripted prompter - answers from a fixed list, for non-interactive runs.

use std::collections::VecDeque;

use crate::domain::assignment::RosterError;
use crate::domain::foundation::{AgentId, ItemId};
use crate::ports::{PromptError, SituationPrompter};

/// Replays queued answers in order; runs out with `PromptError::Exhausted`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    absent: VecDeque<Vec<String>>,
    skipped: VecDeque<Vec<String>>,
    rejections: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompter that gives exactly one answer to each question
    pub fn once(absent: Vec<String>, skipped: Vec<String>) -> Self {
        Self::new().then_absent(absent).then_skipped(skipped)
    }

    pub fn then_absent(mut self, names: Vec<String>) -> Self {
        self.absent.push_back(names);
        self
    }

    pub fn then_skipped(mut self, names: Vec<String>) -> Self {
        self.skipped.push_back(names);
        self
    }

    /// Messages of every rejected answer, in order
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }
}

impl SituationPrompter for ScriptedPrompter {
    fn ask_absent(&mut self, _agents: &[AgentId]) -> Result<Vec<String>, PromptError> {
        self.absent.pop_front().ok_or(PromptError::Exhausted)
    }

    fn ask_skipped(
        &mut self,
        _required: usize,
        _items: &[ItemId],
    ) -> Result<Vec<String>, PromptError> {
        self.skipped.pop_front().ok_or(PromptError::Exhausted)
    }

    fn reject(&mut self, problem: &RosterError) -> Result<(), PromptError> {
        self.rejections.push(problem.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order_then_exhausts() {
        let mut prompter = ScriptedPrompter::new()
            .then_absent(vec!["AB".to_string()])
            .then_absent(vec![]);

        assert_eq!(prompter.ask_absent(&[]).unwrap(), vec!["AB"]);
        assert!(prompter.ask_absent(&[]).unwrap().is_empty());
        assert!(matches!(
            prompter.ask_absent(&[]),
            Err(PromptError::Exhausted)
        ));
    }

    #[test]
    fn records_rejections() {
        let mut prompter = ScriptedPrompter::new();
        prompter.reject(&RosterError::NobodyPresent).unwrap();
        assert_eq!(prompter.rejections(), &["Nobody is present".to_string()]);
    }
}
