//! ResolveRosterHandler - establishes who is present and which chores are active.
//!
//! Bad answers are reported back through the prompter and asked again; only a
//! failure of the prompter itself, or a sheet that cannot be reconciled at
//! all, ends the loop.

use tracing::{info, warn};

use crate::domain::assignment::{ActiveSet, RosterError};
use crate::domain::preferences::PreferenceModel;
use crate::ports::{PromptError, SituationPrompter};

/// Error type for roster resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveRosterError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// A roster problem no answer can fix.
    #[error(transparent)]
    Unresolvable(RosterError),
}

/// Handler for resolving this period's active set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveRosterHandler;

impl ResolveRosterHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        model: &PreferenceModel,
        prompter: &mut dyn SituationPrompter,
    ) -> Result<ActiveSet, ResolveRosterError> {
        // 1. Who is away
        let (absent, present) = loop {
            let absent = prompter.ask_absent(model.agents())?;
            match ActiveSet::present_agents(model, &absent) {
                Ok(present) => break (absent, present),
                Err(problem) => Self::reject(prompter, problem)?,
            }
        };

        // 2. Which chores to drop, if there are more chores than people
        let required = ActiveSet::required_skips(model, present.len());
        loop {
            let skipped = if required == 0 {
                Vec::new()
            } else {
                prompter.ask_skipped(required, &model.items())?
            };

            match ActiveSet::reconcile(model, &absent, &skipped) {
                Ok(active) => {
                    info!(
                        agents = active.len(),
                        absent = absent.len(),
                        skipped = skipped.len(),
                        "Resolved active set"
                    );
                    return Ok(active);
                }
                Err(problem @ RosterError::PlaceholderMissing(_)) => {
                    return Err(ResolveRosterError::Unresolvable(problem));
                }
                Err(problem) if required == 0 => {
                    return Err(ResolveRosterError::Unresolvable(problem));
                }
                Err(problem) => Self::reject(prompter, problem)?,
            }
        }
    }

    fn reject(
        prompter: &mut dyn SituationPrompter,
        problem: RosterError,
    ) -> Result<(), ResolveRosterError> {
        warn!(%problem, "Rejected answer, asking again");
        prompter.reject(&problem)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ScriptedPrompter;

    fn model() -> PreferenceModel {
        PreferenceModel::builder()
            .agents(vec!["AB", "CD", "EF"])
            .item("Dishes", vec![1.0, 2.0, 3.0])
            .item("Lawn", vec![2.0, 3.0, 1.0])
            .item("Bathroom", vec![3.0, 1.0, 2.0])
            .item("Wild", vec![4.0, 4.0, 4.0])
            .build()
            .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn everyone_present_needs_no_skips() {
        let mut prompter = ScriptedPrompter::new().then_absent(vec![]);

        let active = ResolveRosterHandler::new()
            .handle(&model(), &mut prompter)
            .unwrap();

        assert_eq!(active.len(), 3);
        assert!(prompter.rejections().is_empty());
    }

    #[test]
    fn reasks_after_unknown_agent() {
        let mut prompter = ScriptedPrompter::new()
            .then_absent(names(&["ZZ"]))
            .then_absent(names(&["AB"]))
            .then_skipped(names(&["Lawn"]));

        let active = ResolveRosterHandler::new()
            .handle(&model(), &mut prompter)
            .unwrap();

        assert_eq!(active.len(), 2);
        assert_eq!(prompter.rejections(), &["Who is 'ZZ'?".to_string()]);
    }

    #[test]
    fn reasks_after_wrong_skip_count() {
        let mut prompter = ScriptedPrompter::new()
            .then_absent(names(&["AB"]))
            .then_skipped(vec![])
            .then_skipped(names(&["Attic"]))
            .then_skipped(names(&["Dishes"]));

        let active = ResolveRosterHandler::new()
            .handle(&model(), &mut prompter)
            .unwrap();

        let items: Vec<&str> = active.items().iter().map(|i| i.as_str()).collect();
        assert_eq!(items, vec!["Lawn", "Bathroom"]);
        assert_eq!(prompter.rejections().len(), 2);
    }

    #[test]
    fn exhausted_prompter_is_fatal() {
        let mut prompter = ScriptedPrompter::new().then_absent(names(&["ZZ"]));

        let err = ResolveRosterHandler::new()
            .handle(&model(), &mut prompter)
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveRosterError::Prompt(PromptError::Exhausted)
        ));
    }

    #[test]
    fn missing_placeholder_row_is_unresolvable() {
        let model = PreferenceModel::builder()
            .agents(vec!["AB", "CD"])
            .item("Dishes", vec![1.0, 1.0])
            .build()
            .unwrap();
        let mut prompter = ScriptedPrompter::new().then_absent(vec![]);

        let err = ResolveRosterHandler::new()
            .handle(&model, &mut prompter)
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveRosterError::Unresolvable(RosterError::PlaceholderMissing(_))
        ));
    }
}
