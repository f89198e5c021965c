//! Cycle Baseline Builder - the starting assignment of a period.
//!
//! At the first period of a cycle the active item list is rotated by the
//! cycle index and paired positionally with the agents. Later periods carry
//! over the cycle's opening assignment, hand unclaimed items to newcomers,
//! and then bump the weekly-rotating items along to other agents. Agents
//! touched by those bumps form the displaced set.

use std::collections::{HashSet, VecDeque};
use tracing::debug;

use crate::domain::assignment::{ActiveSet, Assignment};
use crate::domain::foundation::{AgentId, ItemId};
use crate::domain::history::History;

use super::{rotate_right, BaselineError, PeriodInfo};

/// Agents whose item changed due to weekly rotation, in first-touched order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplacedSet {
    agents: Vec<AgentId>,
}

impl DisplacedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `agent`; duplicates are ignored.
    pub fn insert(&mut self, agent: AgentId) {
        if !self.agents.contains(&agent) {
            self.agents.push(agent);
        }
    }

    pub fn contains(&self, agent: &AgentId) -> bool {
        self.agents.contains(agent)
    }

    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// How a baseline was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineKind {
    /// Seeded by rotation at a cycle start; full optimisation follows.
    FreshCycle,
    /// Carried over from the cycle's opening record; only the displaced
    /// agents may ask for pairwise swaps.
    Continuation,
}

/// A period's starting assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub assignment: Assignment,
    pub displaced: DisplacedSet,
    pub kind: BaselineKind,
}

impl Baseline {
    pub fn needs_full_optimization(&self) -> bool {
        self.kind == BaselineKind::FreshCycle
    }
}

/// Matching key that keeps placeholder instances distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MatchKey {
    Item(ItemId),
    Placeholder(usize),
}

/// Builds baselines for a rota whose placeholder and weekly-rotating items are fixed.
#[derive(Debug, Clone)]
pub struct CycleBaselineBuilder {
    placeholder: ItemId,
    weekly_rotating: Vec<ItemId>,
}

impl CycleBaselineBuilder {
    pub fn new(placeholder: ItemId, weekly_rotating: Vec<ItemId>) -> Self {
        Self {
            placeholder,
            weekly_rotating,
        }
    }

    /// Seeds a cycle: rotates the active items right by `cycle_index mod n`
    /// and pairs them positionally with the active agents.
    pub fn fresh_cycle(
        &self,
        active: &ActiveSet,
        cycle_index: i64,
    ) -> Result<Baseline, BaselineError> {
        let n = active.items().len();
        let shift = if n == 0 {
            0
        } else {
            cycle_index.rem_euclid(n as i64) as usize
        };
        debug!(cycle_index, shift, "Seeding fresh cycle baseline");

        let items = rotate_right(active.items(), shift);
        let assignment = Assignment::new(active.agents().to_vec(), items)?;

        Ok(Baseline {
            assignment,
            displaced: DisplacedSet::new(),
            kind: BaselineKind::FreshCycle,
        })
    }

    /// Builds a later period's baseline from the record at the cycle anchor,
    /// then applies the weekly rotation.
    ///
    /// # Errors
    ///
    /// `BaselineError::NotFound` if the history has no record at
    /// `period.cycle_anchor`. Callers recover by seeding a fresh cycle.
    pub fn continuation(
        &self,
        active: &ActiveSet,
        history: &History,
        period: &PeriodInfo,
    ) -> Result<Baseline, BaselineError> {
        let opening = history
            .find(period.cycle_anchor)
            .ok_or(BaselineError::NotFound(period.cycle_anchor))?;

        let carried = self.carry_over(&opening.assignment, active)?;
        let (assignment, displaced) = self.rotate_weekly(carried, period.period_index);

        Ok(Baseline {
            assignment,
            displaced,
            kind: BaselineKind::Continuation,
        })
    }

    /// Applies the cycle's opening assignment to this period's agents and items.
    ///
    /// Present agents keep their opening item when it is still active;
    /// everyone else draws, in agent order, from the active items nobody
    /// held at the opening.
    pub fn carry_over(
        &self,
        opening: &Assignment,
        active: &ActiveSet,
    ) -> Result<Assignment, BaselineError> {
        let present: HashSet<&AgentId> = active.agents().iter().collect();
        let opening = opening.retain_agents(|a| present.contains(a));

        let opening_keys = self.tag(opening.items());
        let active_keys = self.tag(active.items());

        let opening_set: HashSet<&MatchKey> = opening_keys.iter().collect();
        let active_set: HashSet<&MatchKey> = active_keys.iter().collect();

        let mut extras: VecDeque<&MatchKey> = active_keys
            .iter()
            .filter(|key| !opening_set.contains(key))
            .collect();

        let mut used: HashSet<&MatchKey> = HashSet::new();
        let mut keys = Vec::with_capacity(active.len());

        for agent in active.agents() {
            let kept = opening
                .position_of(agent)
                .map(|pos| &opening_keys[pos])
                .filter(|key| active_set.contains(key) && !used.contains(key));

            let key = match kept {
                Some(key) => key,
                None => {
                    let drawn = extras.pop_front().ok_or(BaselineError::ItemsExhausted)?;
                    debug!(agent = %agent, item = ?drawn, "Assigning unclaimed item");
                    drawn
                }
            };
            used.insert(key);
            keys.push(self.untag(key));
        }

        Ok(Assignment::new(active.agents().to_vec(), keys)?)
    }

    /// Bumps every holder of a weekly-rotating item forward by
    /// `(period_index mod (n - 1)) + 1` positions, swapping items with the
    /// agent found there. Both parties to each swap become displaced.
    pub fn rotate_weekly(
        &self,
        mut assignment: Assignment,
        period_index: i64,
    ) -> (Assignment, DisplacedSet) {
        let mut displaced = DisplacedSet::new();
        let n = assignment.len();
        if n < 2 {
            return (assignment, displaced);
        }

        let offset = period_index.rem_euclid((n - 1) as i64) as usize + 1;

        for rotating in &self.weekly_rotating {
            let holders: Vec<usize> = assignment
                .items()
                .iter()
                .enumerate()
                .filter(|(_, item)| *item == rotating)
                .map(|(i, _)| i)
                .collect();

            for i in holders {
                let j = (i + offset) % n;
                debug!(item = %rotating, offset, from = i, to = j, "Rotating weekly item");
                assignment.swap_items(i, j);
                displaced.insert(assignment.agents()[i].clone());
                displaced.insert(assignment.agents()[j].clone());
            }
        }

        (assignment, displaced)
    }

    fn tag(&self, items: &[ItemId]) -> Vec<MatchKey> {
        let mut count = 0;
        items
            .iter()
            .map(|item| {
                if *item == self.placeholder {
                    count += 1;
                    MatchKey::Placeholder(count)
                } else {
                    MatchKey::Item(item.clone())
                }
            })
            .collect()
    }

    fn untag(&self, key: &MatchKey) -> ItemId {
        match key {
            MatchKey::Item(item) => item.clone(),
            MatchKey::Placeholder(_) => self.placeholder.clone(),
        }
    }
}
