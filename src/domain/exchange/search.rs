//! Exchange Search - finds the best exchange cycle starting from one agent.
//!
//! The exchange graph has an edge `u -> v` when `u` would accept the item
//! `v` holds. Accepting means a strictly lower cost, or an equal cost once
//! the branch has already banked a strict gain. The very first step of a
//! branch is therefore never lateral, which rules out zero-sum loops.
//!
//! The search is a depth-first walk from the starting agent. Candidates are
//! visited in assignment order, and among all cycles closing back at the
//! start the one with the largest total gain wins; ties go to the cycle
//! found first.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::assignment::Assignment;
use crate::domain::foundation::AgentId;
use crate::domain::preferences::PreferenceModel;

use super::ExchangeError;

/// Gains at or below this are treated as no gain.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// How far a branch may extend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Cycles of any length.
    #[default]
    Unrestricted,
    /// Direct two-agent swaps only.
    PairwiseOnly,
}

/// A cycle of agents. Each agent takes the item of the next one, and the
/// last takes the item of the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeCycle {
    pub agents: Vec<AgentId>,
    /// Total cost reduction across all participants.
    pub improvement: f64,
}

impl ExchangeCycle {
    /// Returns a new assignment with the cycle applied.
    pub fn apply_to(&self, assignment: &Assignment) -> Result<Assignment, ExchangeError> {
        let positions = self
            .agents
            .iter()
            .map(|a| {
                assignment
                    .position_of(a)
                    .ok_or_else(|| ExchangeError::AgentNotAssigned(a.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut items = assignment.items().to_vec();
        rotate_along(&mut items, &positions);
        Ok(assignment.with_items(items)?)
    }
}

impl fmt::Display for ExchangeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for agent in &self.agents {
            write!(f, "{}  <-  ", agent)?;
        }
        match self.agents.first() {
            Some(first) => write!(f, "{}", first),
            None => Ok(()),
        }
    }
}

/// Moves `values[positions[k + 1]]` to `positions[k]`, wrapping around.
pub(super) fn rotate_along<T: Clone>(values: &mut [T], positions: &[usize]) {
    let Some(&first) = positions.first() else {
        return;
    };
    let head = values[first].clone();
    for pair in positions.windows(2) {
        values[pair[0]] = values[pair[1]].clone();
    }
    if let Some(&last) = positions.last() {
        values[last] = head;
    }
}

/// An assignment resolved to preference table indices.
#[derive(Debug, Clone)]
pub(super) struct Resolved {
    pub agents: Vec<usize>,
    pub items: Vec<usize>,
}

impl Resolved {
    pub fn new(model: &PreferenceModel, assignment: &Assignment) -> Result<Self, ExchangeError> {
        let agents = assignment
            .agents()
            .iter()
            .map(|a| model.agent_position(a))
            .collect::<Result<Vec<_>, _>>()?;
        let items = assignment
            .items()
            .iter()
            .map(|i| model.item_position(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { agents, items })
    }

    /// Cost the agent at `holder` pays for the item at `slot`.
    pub fn cost(&self, model: &PreferenceModel, holder: usize, slot: usize) -> f64 {
        model.cost_at(self.agents[holder], self.items[slot])
    }
}

/// Cycle search over a fixed preference table.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeSearch<'a> {
    model: &'a PreferenceModel,
    mode: SearchMode,
}

impl<'a> ExchangeSearch<'a> {
    pub fn new(model: &'a PreferenceModel, mode: SearchMode) -> Self {
        Self { model, mode }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Finds the most improving exchange cycle through `start`.
    ///
    /// Returns `Ok(None)` when no cycle closes; that is not an error.
    pub fn find_cycle(
        &self,
        assignment: &Assignment,
        start: &AgentId,
    ) -> Result<Option<ExchangeCycle>, ExchangeError> {
        let start_pos = assignment
            .position_of(start)
            .ok_or_else(|| ExchangeError::AgentNotAssigned(start.clone()))?;
        let resolved = Resolved::new(self.model, assignment)?;

        Ok(self.search(&resolved, start_pos).map(|(path, improvement)| ExchangeCycle {
            agents: path
                .into_iter()
                .map(|pos| assignment.agents()[pos].clone())
                .collect(),
            improvement,
        }))
    }

    /// Searches from position `start`, returning cycle positions and total gain.
    pub(super) fn search(&self, state: &Resolved, start: usize) -> Option<(Vec<usize>, f64)> {
        let n = state.agents.len();
        let mut walk = Walk {
            model: self.model,
            state,
            mode: self.mode,
            start,
            path: Vec::with_capacity(n),
            on_path: vec![false; n],
            best: None,
        };
        walk.path.push(start);
        walk.on_path[start] = true;
        walk.explore(start, 0.0);
        walk.best
    }
}

/// Per-call traversal state. Constructed fresh for every search so no
/// branch bookkeeping leaks between calls.
struct Walk<'s> {
    model: &'s PreferenceModel,
    state: &'s Resolved,
    mode: SearchMode,
    start: usize,
    /// Agents visited on the current branch, `start` first, current last.
    path: Vec<usize>,
    on_path: Vec<bool>,
    best: Option<(Vec<usize>, f64)>,
}

impl Walk<'_> {
    fn explore(&mut self, current: usize, banked: f64) {
        let held = self.state.cost(self.model, current, current);

        for candidate in 0..self.state.agents.len() {
            if candidate == current || (self.on_path[candidate] && candidate != self.start) {
                continue;
            }

            let gain = held - self.state.cost(self.model, current, candidate);
            let acceptable = if banked > IMPROVEMENT_EPSILON {
                gain >= 0.0
            } else {
                gain > IMPROVEMENT_EPSILON
            };
            if !acceptable {
                continue;
            }

            let total = banked + gain;

            if candidate == self.start {
                self.record(total);
            } else if self.may_extend() {
                self.path.push(candidate);
                self.on_path[candidate] = true;
                self.explore(candidate, total);
                self.on_path[candidate] = false;
                self.path.pop();
            }
        }
    }

    fn may_extend(&self) -> bool {
        let within_bound = self.path.len() < self.state.agents.len();
        match self.mode {
            SearchMode::Unrestricted => within_bound,
            SearchMode::PairwiseOnly => within_bound && self.path.len() == 1,
        }
    }

    fn record(&mut self, total: f64) {
        if total <= IMPROVEMENT_EPSILON {
            return;
        }
        let better = match &self.best {
            Some((_, best)) => total > *best,
            None => true,
        };
        if better {
            self.best = Some((self.path.clone(), total));
        }
    }
}
