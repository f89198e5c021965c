//! Active set reconciliation - who is here and which chores are needed.

use std::collections::HashSet;

use crate::domain::foundation::{AgentId, ItemId};
use crate::domain::preferences::PreferenceModel;

use super::RosterError;

/// Agents present and items active this period, of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSet {
    agents: Vec<AgentId>,
    items: Vec<ItemId>,
}

impl ActiveSet {
    /// Resolves the present agents, keeping catalogue order.
    ///
    /// # Errors
    ///
    /// `UnknownAgent` if a name in `absent` is not a catalogued agent,
    /// `NobodyPresent` if everyone is away.
    pub fn present_agents(
        model: &PreferenceModel,
        absent: &[String],
    ) -> Result<Vec<AgentId>, RosterError> {
        let mut away = HashSet::new();
        for name in absent {
            if !model.agents().iter().any(|a| a.as_str() == name) {
                return Err(RosterError::UnknownAgent(name.clone()));
            }
            away.insert(name.as_str());
        }

        let present: Vec<AgentId> = model
            .agents()
            .iter()
            .filter(|a| !away.contains(a.as_str()))
            .cloned()
            .collect();

        if present.is_empty() {
            return Err(RosterError::NobodyPresent);
        }
        Ok(present)
    }

    /// Number of real items that must be skipped for `present` agents.
    pub fn required_skips(model: &PreferenceModel, present: usize) -> usize {
        model.items().len().saturating_sub(present)
    }

    /// Reconciles agents and items to equal size.
    ///
    /// - more agents than items: one placeholder per surplus agent
    /// - more items than agents: `skipped` must name exactly the surplus
    /// - otherwise: identity, `skipped` must be empty
    pub fn reconcile(
        model: &PreferenceModel,
        absent: &[String],
        skipped: &[String],
    ) -> Result<Self, RosterError> {
        let agents = Self::present_agents(model, absent)?;
        let catalogue = model.items();

        let expected = Self::required_skips(model, agents.len());
        if skipped.len() != expected {
            return Err(RosterError::WrongSkipCount {
                expected,
                actual: skipped.len(),
            });
        }

        let mut skip = HashSet::new();
        for name in skipped {
            if !catalogue.iter().any(|i| i.as_str() == name) {
                return Err(RosterError::UnknownItem(name.clone()));
            }
            if !skip.insert(name.as_str()) {
                return Err(RosterError::DuplicateEntry(name.clone()));
            }
        }

        let mut items: Vec<ItemId> = catalogue
            .into_iter()
            .filter(|i| !skip.contains(i.as_str()))
            .collect();

        if agents.len() > items.len() {
            if !model.has_placeholder() {
                return Err(RosterError::PlaceholderMissing(
                    model.placeholder().to_string(),
                ));
            }
            let surplus = agents.len() - items.len();
            items.extend(std::iter::repeat(model.placeholder().clone()).take(surplus));
        }

        Ok(Self { agents, items })
    }

    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
