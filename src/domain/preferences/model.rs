//! Preference Model - Immutable misery table for one run.

use std::collections::HashMap;

use crate::domain::foundation::{AgentId, ItemId};

use super::PreferenceError;

/// Reserved item name of the filler row used when agents outnumber items.
pub const DEFAULT_PLACEHOLDER: &str = "Wild";

/// Agent x item cost table.
///
/// Rows are items in catalogue order, columns are agents in header order.
/// The placeholder row, when present, is queryable through [`cost`] but is
/// excluded from [`items`], which lists only the real items.
///
/// [`cost`]: PreferenceModel::cost
/// [`items`]: PreferenceModel::items
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceModel {
    agents: Vec<AgentId>,
    catalogue: Vec<ItemId>,
    placeholder: ItemId,
    agent_index: HashMap<AgentId, usize>,
    item_index: HashMap<ItemId, usize>,
    /// costs[agent][item], both indexed in declaration order.
    costs: Vec<Vec<f64>>,
}

impl PreferenceModel {
    /// Creates a builder for constructing a preference model.
    pub fn builder() -> PreferenceModelBuilder {
        PreferenceModelBuilder::new()
    }

    /// Parses a tab-separated preference sheet.
    ///
    /// The first line is a header whose first cell is ignored and whose
    /// remaining cells are agent identifiers. Each following line with a
    /// non-empty first cell is `item<TAB>cost-for-agent-1<TAB>...`.
    pub fn from_tsv(text: &str, placeholder: &str) -> Result<Self, PreferenceError> {
        let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

        let header = lines.next().ok_or(PreferenceError::MissingHeader)?;
        let mut agents: Vec<&str> = header.split('\t').skip(1).map(str::trim).collect();
        while agents.last().is_some_and(|a| a.is_empty()) {
            agents.pop();
        }

        let mut builder = PreferenceModelBuilder::new()
            .placeholder(placeholder)
            .agents(agents.clone());

        for line in lines {
            let mut cells = line.split('\t');
            let item = match cells.next().map(str::trim) {
                Some(item) if !item.is_empty() => item,
                _ => continue,
            };

            let raw: Vec<&str> = cells.take(agents.len()).map(str::trim).collect();
            if raw.len() < agents.len() {
                return Err(PreferenceError::MissingCost {
                    item: item.to_string(),
                    expected: agents.len(),
                    actual: raw.len(),
                });
            }

            let mut costs = Vec::with_capacity(raw.len());
            for (agent, cell) in agents.iter().zip(&raw) {
                let value = cell.parse::<f64>().map_err(|_| PreferenceError::NotANumber {
                    agent: agent.to_string(),
                    item: item.to_string(),
                    raw: cell.to_string(),
                })?;
                costs.push(value);
            }
            builder = builder.item(item, costs);
        }

        builder.build()
    }

    /// Returns the agent universe in header order.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// Returns the real items in catalogue order, placeholder excluded.
    pub fn items(&self) -> Vec<ItemId> {
        self.catalogue
            .iter()
            .filter(|item| **item != self.placeholder)
            .cloned()
            .collect()
    }

    /// Returns every catalogued item, placeholder included.
    pub fn catalogue(&self) -> &[ItemId] {
        &self.catalogue
    }

    /// Returns the placeholder item identity.
    pub fn placeholder(&self) -> &ItemId {
        &self.placeholder
    }

    /// Returns true if `item` is the placeholder.
    pub fn is_placeholder(&self, item: &ItemId) -> bool {
        *item == self.placeholder
    }

    /// Returns true if the placeholder row was catalogued.
    pub fn has_placeholder(&self) -> bool {
        self.item_index.contains_key(&self.placeholder)
    }

    /// Returns the upper bound of the cost scale (number of catalogued items).
    pub fn max_cost(&self) -> usize {
        self.catalogue.len()
    }

    /// Returns the cost `agent` attaches to `item`.
    pub fn cost(&self, agent: &AgentId, item: &ItemId) -> Result<f64, PreferenceError> {
        let a = self.agent_position(agent)?;
        let i = self.item_position(item)?;
        Ok(self.costs[a][i])
    }

    /// Returns the costs of one agent for every catalogued item.
    pub fn costs_for(&self, agent: &AgentId) -> Result<Vec<(ItemId, f64)>, PreferenceError> {
        let a = self.agent_position(agent)?;
        Ok(self
            .catalogue
            .iter()
            .cloned()
            .zip(self.costs[a].iter().copied())
            .collect())
    }

    pub(crate) fn agent_position(&self, agent: &AgentId) -> Result<usize, PreferenceError> {
        self.agent_index
            .get(agent)
            .copied()
            .ok_or_else(|| PreferenceError::UnknownAgent(agent.to_string()))
    }

    pub(crate) fn item_position(&self, item: &ItemId) -> Result<usize, PreferenceError> {
        self.item_index
            .get(item)
            .copied()
            .ok_or_else(|| PreferenceError::UnknownItem(item.to_string()))
    }

    /// Cost lookup by resolved positions.
    pub(crate) fn cost_at(&self, agent: usize, item: usize) -> f64 {
        self.costs[agent][item]
    }
}

/// Builder for constructing PreferenceModel instances.
#[derive(Debug, Default)]
pub struct PreferenceModelBuilder {
    agents: Vec<String>,
    rows: Vec<(String, Vec<f64>)>,
    placeholder: Option<String>,
}

impl PreferenceModelBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the agents (column order).
    pub fn agents(mut self, ids: Vec<impl Into<String>>) -> Self {
        self.agents = ids.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds an item row with one cost per agent, in agent order.
    pub fn item(mut self, id: impl Into<String>, costs: Vec<f64>) -> Self {
        self.rows.push((id.into(), costs));
        self
    }

    /// Overrides the placeholder item name.
    pub fn placeholder(mut self, id: impl Into<String>) -> Self {
        self.placeholder = Some(id.into());
        self
    }

    /// Validates and builds the preference model.
    ///
    /// # Errors
    ///
    /// Fails with `OutOfRange` if any cost lies outside `[1, N]`, where `N`
    /// is the number of item rows.
    pub fn build(self) -> Result<PreferenceModel, PreferenceError> {
        if self.agents.is_empty() {
            return Err(PreferenceError::NoAgents);
        }

        let placeholder =
            ItemId::new(self.placeholder.unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()))?;

        let mut agents = Vec::with_capacity(self.agents.len());
        let mut agent_index = HashMap::new();
        for (i, name) in self.agents.into_iter().enumerate() {
            let id = AgentId::new(name)?;
            if agent_index.insert(id.clone(), i).is_some() {
                return Err(PreferenceError::DuplicateAgent(id.to_string()));
            }
            agents.push(id);
        }

        let max = self.rows.len();
        let mut catalogue = Vec::with_capacity(max);
        let mut item_index = HashMap::new();
        let mut costs = vec![Vec::with_capacity(max); agents.len()];

        for (i, (name, row)) in self.rows.into_iter().enumerate() {
            let item = ItemId::new(name)?;
            if item_index.insert(item.clone(), i).is_some() {
                return Err(PreferenceError::DuplicateItem(item.to_string()));
            }
            if row.len() != agents.len() {
                return Err(PreferenceError::MissingCost {
                    item: item.to_string(),
                    expected: agents.len(),
                    actual: row.len(),
                });
            }
            for (a, value) in row.into_iter().enumerate() {
                if !(1.0..=max as f64).contains(&value) {
                    return Err(PreferenceError::OutOfRange {
                        agent: agents[a].to_string(),
                        item: item.to_string(),
                        value,
                        max,
                    });
                }
                costs[a].push(value);
            }
            catalogue.push(item);
        }

        Ok(PreferenceModel {
            agents,
            catalogue,
            placeholder,
            agent_index,
            item_index,
            costs,
        })
    }
}
