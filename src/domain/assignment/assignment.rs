//! Assignment value object - an ordered agent/item correspondence.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::{AgentId, ItemId};

use super::AssignmentError;

/// Pairs `agents[i]` with `items[i]`.
///
/// Agents are unique. Items may repeat only for the placeholder, which the
/// builders that produce assignments guarantee; this type does not know
/// which item is the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    agents: Vec<AgentId>,
    items: Vec<ItemId>,
}

impl Assignment {
    /// Creates an assignment from index-aligned lists.
    pub fn new(agents: Vec<AgentId>, items: Vec<ItemId>) -> Result<Self, AssignmentError> {
        if agents.len() != items.len() {
            return Err(AssignmentError::LengthMismatch {
                agents: agents.len(),
                items: items.len(),
            });
        }

        let mut seen = HashSet::with_capacity(agents.len());
        for agent in &agents {
            if !seen.insert(agent) {
                return Err(AssignmentError::DuplicateAgent(agent.clone()));
            }
        }

        Ok(Self { agents, items })
    }

    /// Creates an assignment from `(agent, item)` pairs, keeping their order.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (AgentId, ItemId)>,
    ) -> Result<Self, AssignmentError> {
        let (agents, items) = pairs.into_iter().unzip();
        Self::new(agents, items)
    }

    /// Returns the agents in presentation order.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// Returns the items, aligned with [`agents`](Assignment::agents).
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Returns the position of `agent`, if assigned.
    pub fn position_of(&self, agent: &AgentId) -> Option<usize> {
        self.agents.iter().position(|a| a == agent)
    }

    /// Returns the item currently held by `agent`.
    pub fn item_of(&self, agent: &AgentId) -> Option<&ItemId> {
        self.position_of(agent).map(|i| &self.items[i])
    }

    /// Iterates over `(agent, item)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&AgentId, &ItemId)> {
        self.agents.iter().zip(self.items.iter())
    }

    /// Returns a copy with the same agents holding `items`.
    pub fn with_items(&self, items: Vec<ItemId>) -> Result<Self, AssignmentError> {
        Self::new(self.agents.clone(), items)
    }

    /// Keeps only the pairs whose agent satisfies `keep`, preserving order.
    pub fn retain_agents(&self, mut keep: impl FnMut(&AgentId) -> bool) -> Self {
        let (agents, items) = self
            .pairs()
            .filter(|(agent, _)| keep(agent))
            .map(|(a, i)| (a.clone(), i.clone()))
            .unzip();
        Self { agents, items }
    }

    /// Consumes the assignment, returning its lists.
    pub fn into_parts(self) -> (Vec<AgentId>, Vec<ItemId>) {
        (self.agents, self.items)
    }

    pub(crate) fn swap_items(&mut self, i: usize, j: usize) {
        self.items.swap(i, j);
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (agent, item) in self.pairs() {
            writeln!(f, "{:5} - {:15}", agent.as_str(), item.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agents(ids: &[&str]) -> Vec<AgentId> {
        ids.iter().map(|id| AgentId::new(*id).unwrap()).collect()
    }

    fn items(ids: &[&str]) -> Vec<ItemId> {
        ids.iter().map(|id| ItemId::new(*id).unwrap()).collect()
    }

    #[test]
    fn rejects_unequal_lengths() {
        let result = Assignment::new(agents(&["A", "B"]), items(&["X"]));
        assert_eq!(
            result,
            Err(AssignmentError::LengthMismatch { agents: 2, items: 1 })
        );
    }

    #[test]
    fn rejects_duplicate_agents() {
        let result = Assignment::new(agents(&["A", "A"]), items(&["X", "Y"]));
        assert!(matches!(result, Err(AssignmentError::DuplicateAgent(_))));
    }

    #[test]
    fn allows_repeated_items() {
        let result = Assignment::new(agents(&["A", "B"]), items(&["Wild", "Wild"]));
        assert!(result.is_ok());
    }

    #[test]
    fn looks_up_items_by_agent() {
        let assignment = Assignment::new(agents(&["A", "B"]), items(&["X", "Y"])).unwrap();

        assert_eq!(assignment.item_of(&agents(&["B"])[0]).unwrap().as_str(), "Y");
        assert_eq!(assignment.position_of(&agents(&["C"])[0]), None);
    }

    #[test]
    fn retain_agents_preserves_order() {
        let assignment =
            Assignment::new(agents(&["A", "B", "C"]), items(&["X", "Y", "Z"])).unwrap();
        let kept = assignment.retain_agents(|a| a.as_str() != "B");

        assert_eq!(kept.agents(), agents(&["A", "C"]).as_slice());
        assert_eq!(kept.items(), items(&["X", "Z"]).as_slice());
    }

    #[test]
    fn display_prints_one_line_per_pair() {
        let assignment = Assignment::new(agents(&["A"]), items(&["Dishes"])).unwrap();
        assert_eq!(assignment.to_string(), "A     - Dishes         \n");
    }
}
