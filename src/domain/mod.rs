//! Domain layer containing the rota logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, validation errors)
//! - `preferences` - Misery table and cost metric
//! - `assignment` - Agent-to-item assignments and active-set reconciliation
//! - `rotation` - Calendar arithmetic and per-period baseline construction
//! - `history` - Recorded assignments, one per period
//! - `exchange` - Cyclic exchange search and the improvement loop

pub mod assignment;
pub mod exchange;
pub mod foundation;
pub mod history;
pub mod preferences;
pub mod rotation;
