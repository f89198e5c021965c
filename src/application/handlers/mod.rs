//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod rota;

pub use rota::{
    PeriodPlan, PlanMode, PlanPeriodCommand, PlanPeriodError, PlanPeriodHandler, PublishError,
    PublishPeriodCommand, PublishPeriodHandler, PublishPeriodResult, ResolveRosterError,
    ResolveRosterHandler,
};
