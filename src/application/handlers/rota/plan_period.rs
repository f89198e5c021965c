//! PlanPeriodHandler - Command handler producing a period's assignment.
//!
//! Picks the baseline for the period (fresh at a cycle start, carried over
//! otherwise), runs the improvement loop to the extent the baseline calls
//! for, and records the result in the history.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::assignment::{ActiveSet, Assignment};
use crate::domain::exchange::{
    Askers, ExchangeCycle, ExchangeError, ImprovementEngine, SearchMode,
};
use crate::domain::foundation::AgentId;
use crate::domain::history::HistoryRecord;
use crate::domain::preferences::PreferenceModel;
use crate::domain::rotation::{
    Baseline, BaselineError, BaselineKind, CycleBaselineBuilder, DisplacedSet, PeriodInfo,
};
use crate::ports::{HistoryStore, StorageError};

/// Command to plan one period.
#[derive(Debug, Clone)]
pub struct PlanPeriodCommand {
    /// Agents present and items active this period.
    pub active: ActiveSet,
    /// Where the period falls in the rota.
    pub period: PeriodInfo,
    /// Compute the plan without writing the history.
    pub dry_run: bool,
}

/// Result of planning a period.
#[derive(Debug, Clone)]
pub struct PeriodPlan {
    pub period: PeriodInfo,
    /// How the baseline was produced.
    pub mode: PlanMode,
    /// Assignment before any exchanges.
    pub initial: Assignment,
    /// Assignment after the improvement loop.
    pub final_assignment: Assignment,
    /// Agents bumped by weekly rotation; empty at a cycle start.
    pub displaced: DisplacedSet,
    pub trades: Vec<ExchangeCycle>,
    /// Total cost before the first trade and after each one.
    pub cost_trace: Vec<f64>,
    /// Whether the history was written.
    pub saved: bool,
}

impl PeriodPlan {
    pub fn improved(&self) -> bool {
        !self.trades.is_empty()
    }
}

/// How a period's baseline came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// First period of a cycle, fully optimised.
    FreshCycle,
    /// Later period carried over from the cycle's opening record.
    Continuation,
    /// Later period whose opening record was missing, seeded fresh instead.
    FallbackFreshCycle,
}

/// Error type for period planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanPeriodError {
    #[error("History storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Could not build baseline: {0}")]
    Baseline(BaselineError),

    #[error("Improvement failed: {0}")]
    Exchange(#[from] ExchangeError),
}

/// Handler for planning periods.
pub struct PlanPeriodHandler {
    history_store: Arc<dyn HistoryStore>,
    baseline_builder: CycleBaselineBuilder,
}

impl PlanPeriodHandler {
    pub fn new(history_store: Arc<dyn HistoryStore>, baseline_builder: CycleBaselineBuilder) -> Self {
        Self {
            history_store,
            baseline_builder,
        }
    }

    pub async fn handle(
        &self,
        model: &PreferenceModel,
        cmd: PlanPeriodCommand,
    ) -> Result<PeriodPlan, PlanPeriodError> {
        let period = cmd.period;

        // 1. Load history
        let mut history = self.history_store.load().await?;

        // 2. Build the baseline
        let (baseline, mode) = if period.is_cycle_start() {
            info!(cycle = period.cycle_index, "Start of a chore cycle");
            (self.fresh(&cmd.active, &period)?, PlanMode::FreshCycle)
        } else {
            info!(
                cycle = period.cycle_index,
                week = period.week_number(),
                "Continuing chore cycle"
            );
            match self
                .baseline_builder
                .continuation(&cmd.active, &history, &period)
            {
                Ok(baseline) => (baseline, PlanMode::Continuation),
                Err(err) if err.is_not_found() => {
                    warn!(%err, "Chore cycle doesn't seem to exist, making a new one");
                    // The weekly bump still applies on top of the new seed.
                    (self.reseed(&cmd.active, &period)?, PlanMode::FallbackFreshCycle)
                }
                Err(err) => return Err(PlanPeriodError::Baseline(err)),
            }
        };

        if !baseline.displaced.is_empty() {
            info!(
                displaced = %join(baseline.displaced.agents()),
                "Agents disturbed by weekly rotation"
            );
        }

        // 3. Improve
        let (search_mode, askers) = Self::improvement_scope(&baseline);
        let outcome =
            ImprovementEngine::new(model, search_mode).improve(&baseline.assignment, &askers)?;

        // 4. Record
        let saved = if cmd.dry_run {
            info!("Dry run, history left untouched");
            false
        } else {
            let replaced = history.upsert(HistoryRecord::new(
                period.period_anchor,
                outcome.assignment.clone(),
            ));
            if replaced {
                info!(date = %period.period_anchor, "Overwriting this week in history");
            } else {
                info!(date = %period.period_anchor, "Adding this week into history");
            }
            self.history_store.save(&history).await?;
            true
        };

        Ok(PeriodPlan {
            period,
            mode,
            initial: baseline.assignment,
            final_assignment: outcome.assignment,
            displaced: baseline.displaced,
            trades: outcome.trades,
            cost_trace: outcome.cost_trace,
            saved,
        })
    }

    fn fresh(&self, active: &ActiveSet, period: &PeriodInfo) -> Result<Baseline, PlanPeriodError> {
        self.baseline_builder
            .fresh_cycle(active, period.cycle_index)
            .map_err(PlanPeriodError::Baseline)
    }

    /// Mid-cycle week without an opening record: seeds a fresh cycle, then
    /// still bumps the weekly-rotating items. Full optimisation follows.
    fn reseed(&self, active: &ActiveSet, period: &PeriodInfo) -> Result<Baseline, PlanPeriodError> {
        let seed = self.fresh(active, period)?;
        let (assignment, displaced) = self
            .baseline_builder
            .rotate_weekly(seed.assignment, period.period_index);
        Ok(Baseline {
            assignment,
            displaced,
            kind: BaselineKind::FreshCycle,
        })
    }

    /// Fresh baselines get a full search by everyone. Continuations only let
    /// displaced agents look for direct swaps, or everyone when nobody was
    /// displaced.
    fn improvement_scope(baseline: &Baseline) -> (SearchMode, Askers) {
        match baseline.kind {
            BaselineKind::FreshCycle => (SearchMode::Unrestricted, Askers::Everyone),
            BaselineKind::Continuation if baseline.displaced.is_empty() => {
                (SearchMode::PairwiseOnly, Askers::Everyone)
            }
            BaselineKind::Continuation => (
                SearchMode::PairwiseOnly,
                Askers::Only(baseline.displaced.agents().to_vec()),
            ),
        }
    }
}

fn join(agents: &[AgentId]) -> String {
    agents
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryHistoryStore;
    use crate::domain::foundation::ItemId;
    use crate::domain::history::History;
    use crate::domain::rotation::RotaCalendar;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn model() -> PreferenceModel {
        PreferenceModel::builder()
            .agents(vec!["A", "B", "C"])
            .item("IA", vec![3.0, 2.0, 1.0])
            .item("IB", vec![1.0, 3.0, 2.0])
            .item("IC", vec![2.0, 1.0, 3.0])
            .build()
            .unwrap()
    }

    fn assignment(pairs: &[(&str, &str)]) -> Assignment {
        Assignment::from_pairs(
            pairs
                .iter()
                .map(|(a, i)| (AgentId::new(*a).unwrap(), ItemId::new(*i).unwrap())),
        )
        .unwrap()
    }

    fn builder() -> CycleBaselineBuilder {
        CycleBaselineBuilder::new(ItemId::new("Wild").unwrap(), vec![])
    }

    fn active(model: &PreferenceModel) -> ActiveSet {
        ActiveSet::reconcile(model, &[], &[]).unwrap()
    }

    fn command(model: &PreferenceModel, today: NaiveDate, dry_run: bool) -> PlanPeriodCommand {
        PlanPeriodCommand {
            active: active(model),
            period: RotaCalendar::default().period_info(today),
            dry_run,
        }
    }

    #[tokio::test]
    async fn cycle_start_is_fully_optimised_and_saved() {
        let model = model();
        let store = Arc::new(InMemoryHistoryStore::new());
        let handler = PlanPeriodHandler::new(store.clone(), builder());

        let plan = handler
            .handle(&model, command(&model, date(2018, 1, 8), false))
            .await
            .unwrap();

        assert_eq!(plan.mode, PlanMode::FreshCycle);
        assert_eq!(plan.cost_trace.last().copied(), Some(3.0));
        assert!(plan.saved);

        let history = store.snapshot().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0].date, date(2018, 1, 8));
        assert_eq!(history.records()[0].assignment, plan.final_assignment);
    }

    #[tokio::test]
    async fn missing_opening_record_falls_back_to_fresh_cycle() {
        let model = model();
        let store = Arc::new(InMemoryHistoryStore::new());
        let handler = PlanPeriodHandler::new(store.clone(), builder());

        let plan = handler
            .handle(&model, command(&model, date(2018, 1, 17), false))
            .await
            .unwrap();

        assert_eq!(plan.mode, PlanMode::FallbackFreshCycle);
        assert!(plan.displaced.is_empty());
        assert_eq!(plan.cost_trace.last().copied(), Some(3.0));
        assert_eq!(store.snapshot().await.records()[0].date, date(2018, 1, 15));
    }

    #[tokio::test]
    async fn continuation_without_displaced_agents_lets_everyone_swap_pairwise() {
        let model = model();
        let opening = History::parse("2018-01-08,A:IA,B:IB,C:IC\n").unwrap();
        let store = Arc::new(InMemoryHistoryStore::with_history(opening));
        let handler = PlanPeriodHandler::new(store.clone(), builder());

        let plan = handler
            .handle(&model, command(&model, date(2018, 1, 15), false))
            .await
            .unwrap();

        assert_eq!(plan.mode, PlanMode::Continuation);
        assert!(plan.displaced.is_empty());
        assert_eq!(plan.initial, assignment(&[("A", "IA"), ("B", "IB"), ("C", "IC")]));

        // A and B swap first (A gains 2, B gains 1), then B and C.
        let first: Vec<&str> = plan.trades[0].agents.iter().map(|a| a.as_str()).collect();
        assert_eq!(first, vec!["A", "B"]);
        assert_eq!(plan.cost_trace, vec![9.0, 6.0, 3.0]);
        assert!(plan.trades.iter().all(|t| t.agents.len() == 2));
        assert_eq!(store.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn fallback_seed_still_bumps_weekly_rotating_items() {
        let model = model();
        let store = Arc::new(InMemoryHistoryStore::new());
        let rotating = CycleBaselineBuilder::new(
            ItemId::new("Wild").unwrap(),
            vec![ItemId::new("IB").unwrap()],
        );
        let handler = PlanPeriodHandler::new(store.clone(), rotating);

        let plan = handler
            .handle(&model, command(&model, date(2018, 1, 17), false))
            .await
            .unwrap();

        // Seed A:IA B:IB C:IC, then IB moves two places on to A.
        assert_eq!(plan.mode, PlanMode::FallbackFreshCycle);
        assert_eq!(plan.initial, assignment(&[("A", "IB"), ("B", "IA"), ("C", "IC")]));
        assert!(plan.displaced.contains(&AgentId::new("A").unwrap()));
        assert!(plan.displaced.contains(&AgentId::new("B").unwrap()));
        assert_eq!(plan.cost_trace.last().copied(), Some(3.0));
    }

    #[tokio::test]
    async fn dry_run_leaves_history_untouched() {
        let model = model();
        let store = Arc::new(InMemoryHistoryStore::new());
        let handler = PlanPeriodHandler::new(store.clone(), builder());

        let plan = handler
            .handle(&model, command(&model, date(2018, 1, 8), true))
            .await
            .unwrap();

        assert!(!plan.saved);
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn replanning_a_week_overwrites_its_record() {
        let model = model();
        let store = Arc::new(InMemoryHistoryStore::new());
        let handler = PlanPeriodHandler::new(store.clone(), builder());

        for _ in 0..2 {
            handler
                .handle(&model, command(&model, date(2018, 1, 9), false))
                .await
                .unwrap();
        }

        assert_eq!(store.snapshot().await.len(), 1);
        assert_eq!(store.save_count().await, 2);
    }
}
