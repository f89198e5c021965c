//! Improvement Engine - repeatedly applies exchange cycles until none remain.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::assignment::Assignment;
use crate::domain::foundation::AgentId;
use crate::domain::preferences::PreferenceModel;

use super::search::{rotate_along, Resolved};
use super::{ExchangeCycle, ExchangeError, ExchangeSearch, SearchMode, IMPROVEMENT_EPSILON};

/// Who may start a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Askers {
    Everyone,
    Only(Vec<AgentId>),
}

/// Result of an improvement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementOutcome {
    pub assignment: Assignment,
    /// Applied cycles, in order.
    pub trades: Vec<ExchangeCycle>,
    /// Total cost before the first trade and after each one.
    pub cost_trace: Vec<f64>,
}

impl ImprovementOutcome {
    pub fn initial_cost(&self) -> f64 {
        self.cost_trace.first().copied().unwrap_or_default()
    }

    pub fn final_cost(&self) -> f64 {
        self.cost_trace.last().copied().unwrap_or_default()
    }
}

/// Drives [`ExchangeSearch`] to a fixpoint.
#[derive(Debug, Clone, Copy)]
pub struct ImprovementEngine<'a> {
    model: &'a PreferenceModel,
    search: ExchangeSearch<'a>,
}

impl<'a> ImprovementEngine<'a> {
    pub fn new(model: &'a PreferenceModel, mode: SearchMode) -> Self {
        Self {
            model,
            search: ExchangeSearch::new(model, mode),
        }
    }

    /// Runs passes over the askers, applying each found cycle immediately,
    /// until a full pass applies nothing.
    ///
    /// Askers are ordered once, most miserable first, using their cost in
    /// the input assignment. The input assignment is left untouched.
    pub fn improve(
        &self,
        assignment: &Assignment,
        askers: &Askers,
    ) -> Result<ImprovementOutcome, ExchangeError> {
        let mut state = Resolved::new(self.model, assignment)?;
        let order = self.order_askers(assignment, &state, askers)?;

        let initial = self.total(&state);
        info!(
            mode = ?self.search.mode(),
            askers = order.len(),
            average_cost = initial / state.agents.len().max(1) as f64,
            "Starting improvement"
        );

        let mut positions_to_items = assignment.items().to_vec();
        let mut trades = Vec::new();
        let mut cost_trace = vec![initial];

        let mut pass = 0usize;
        loop {
            pass += 1;
            let mut traded = false;

            for &asker in &order {
                let Some((path, improvement)) = self.search.search(&state, asker) else {
                    continue;
                };
                if improvement <= IMPROVEMENT_EPSILON {
                    continue;
                }

                rotate_along(&mut state.items, &path);
                rotate_along(&mut positions_to_items, &path);

                let cycle = ExchangeCycle {
                    agents: path
                        .iter()
                        .map(|&pos| assignment.agents()[pos].clone())
                        .collect(),
                    improvement,
                };
                let total = self.total(&state);
                info!(
                    "Executing trade {}; average cost now {:.3}",
                    cycle,
                    total / state.agents.len() as f64
                );

                cost_trace.push(total);
                trades.push(cycle);
                traded = true;
            }

            debug!(pass, traded, "Improvement pass complete");
            if !traded {
                break;
            }
        }

        Ok(ImprovementOutcome {
            assignment: assignment.with_items(positions_to_items)?,
            trades,
            cost_trace,
        })
    }

    fn order_askers(
        &self,
        assignment: &Assignment,
        state: &Resolved,
        askers: &Askers,
    ) -> Result<Vec<usize>, ExchangeError> {
        let mut positions = match askers {
            Askers::Everyone => (0..assignment.len()).collect::<Vec<_>>(),
            Askers::Only(agents) => {
                let mut positions = Vec::with_capacity(agents.len());
                for agent in agents {
                    let pos = assignment
                        .position_of(agent)
                        .ok_or_else(|| ExchangeError::AgentNotAssigned(agent.clone()))?;
                    if !positions.contains(&pos) {
                        positions.push(pos);
                    }
                }
                positions
            }
        };

        positions.sort_by(|&a, &b| {
            let cost_a = state.cost(self.model, a, a);
            let cost_b = state.cost(self.model, b, b);
            cost_b.total_cmp(&cost_a)
        });
        Ok(positions)
    }

    fn total(&self, state: &Resolved) -> f64 {
        (0..state.agents.len())
            .map(|pos| state.cost(self.model, pos, pos))
            .sum()
    }
}
