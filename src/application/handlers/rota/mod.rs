//! Rota command handlers.
//!
//! Handlers for resolving the roster, planning a period and publishing it.

mod plan_period;
mod publish_period;
mod resolve_roster;

pub use plan_period::{
    PeriodPlan, PlanMode, PlanPeriodCommand, PlanPeriodError, PlanPeriodHandler,
};
pub use publish_period::{
    PublishError, PublishPeriodCommand, PublishPeriodHandler, PublishPeriodResult,
};
pub use resolve_roster::{ResolveRosterError, ResolveRosterHandler};
