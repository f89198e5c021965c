//! Cost Metric - Total and average misery of an assignment.

use serde::{Deserialize, Serialize};

use crate::domain::assignment::Assignment;
use crate::domain::foundation::AgentId;

use super::{PreferenceError, PreferenceModel};

/// Range the average cost of any assignment of a fixed item set must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBounds {
    pub min: f64,
    pub max: f64,
}

impl CostBounds {
    /// Returns true if `value` lies within the bounds, with a small tolerance.
    pub fn contains(&self, value: f64) -> bool {
        const TOLERANCE: f64 = 1e-9;
        value >= self.min - TOLERANCE && value <= self.max + TOLERANCE
    }
}

/// Misery computations over an assignment.
pub struct CostMetric;

impl CostMetric {
    /// Sum of `cost(agent, item)` over all pairs.
    pub fn total_cost(
        model: &PreferenceModel,
        assignment: &Assignment,
    ) -> Result<f64, PreferenceError> {
        assignment
            .pairs()
            .map(|(agent, item)| model.cost(agent, item))
            .sum()
    }

    /// Total cost divided by the number of items. Zero for an empty assignment.
    pub fn average_cost(
        model: &PreferenceModel,
        assignment: &Assignment,
    ) -> Result<f64, PreferenceError> {
        if assignment.is_empty() {
            return Ok(0.0);
        }
        Ok(Self::total_cost(model, assignment)? / assignment.len() as f64)
    }

    /// Cost of the item currently held by `agent`.
    pub fn agent_cost(
        model: &PreferenceModel,
        assignment: &Assignment,
        agent: &AgentId,
    ) -> Result<f64, PreferenceError> {
        let item = assignment
            .item_of(agent)
            .ok_or_else(|| PreferenceError::UnknownAgent(agent.to_string()))?;
        model.cost(agent, item)
    }

    /// Bounds on the average cost over every reassignment of the same items.
    ///
    /// Each agent contributes the cheapest (resp. dearest) item in the set,
    /// which no actual pairing can beat.
    pub fn bounds(
        model: &PreferenceModel,
        assignment: &Assignment,
    ) -> Result<CostBounds, PreferenceError> {
        if assignment.is_empty() {
            return Ok(CostBounds { min: 0.0, max: 0.0 });
        }

        let mut min = 0.0;
        let mut max = 0.0;
        for agent in assignment.agents() {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for item in assignment.items() {
                let cost = model.cost(agent, item)?;
                lo = lo.min(cost);
                hi = hi.max(cost);
            }
            min += lo;
            max += hi;
        }

        let n = assignment.len() as f64;
        Ok(CostBounds {
            min: min / n,
            max: max / n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;

    fn model() -> PreferenceModel {
        PreferenceModel::builder()
            .agents(vec!["A", "B", "C"])
            .item("IA", vec![3.0, 2.0, 1.0])
            .item("IB", vec![1.0, 3.0, 2.0])
            .item("IC", vec![2.0, 1.0, 3.0])
            .build()
            .unwrap()
    }

    fn assignment(items: &[&str]) -> Assignment {
        Assignment::new(
            ["A", "B", "C"].iter().map(|a| AgentId::new(*a).unwrap()).collect(),
            items.iter().map(|i| ItemId::new(*i).unwrap()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn total_cost_sums_pairs() {
        let model = model();
        assert_eq!(CostMetric::total_cost(&model, &assignment(&["IA", "IB", "IC"])).unwrap(), 9.0);
        assert_eq!(CostMetric::total_cost(&model, &assignment(&["IB", "IC", "IA"])).unwrap(), 3.0);
    }

    #[test]
    fn average_cost_divides_by_item_count() {
        let model = model();
        let avg = CostMetric::average_cost(&model, &assignment(&["IA", "IB", "IC"])).unwrap();
        assert_eq!(avg, 3.0);
    }

    #[test]
    fn average_cost_of_empty_assignment_is_zero() {
        let empty = Assignment::new(vec![], vec![]).unwrap();
        assert_eq!(CostMetric::average_cost(&model(), &empty).unwrap(), 0.0);
    }

    #[test]
    fn agent_cost_reads_current_item() {
        let model = model();
        let a = assignment(&["IA", "IB", "IC"]);
        let cost = CostMetric::agent_cost(&model, &a, &AgentId::new("B").unwrap()).unwrap();
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn bounds_contain_every_permutation() {
        let model = model();
        let base = assignment(&["IA", "IB", "IC"]);
        let bounds = CostMetric::bounds(&model, &base).unwrap();

        assert_eq!(bounds, CostBounds { min: 1.0, max: 3.0 });
        for perm in [
            ["IA", "IB", "IC"],
            ["IA", "IC", "IB"],
            ["IB", "IA", "IC"],
            ["IB", "IC", "IA"],
            ["IC", "IA", "IB"],
            ["IC", "IB", "IA"],
        ] {
            let avg = CostMetric::average_cost(&model, &assignment(&perm)).unwrap();
            assert!(bounds.contains(avg), "{avg} outside {bounds:?}");
        }
    }

    #[test]
    fn unknown_item_is_an_error() {
        let result = CostMetric::total_cost(&model(), &assignment(&["IA", "IB", "Attic"]));
        assert_eq!(result, Err(PreferenceError::UnknownItem("Attic".to_string())));
    }
}
