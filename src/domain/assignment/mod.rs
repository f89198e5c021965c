//! Assignment Module - Who does what this period.
//!
//! # Components
//!
//! - `Assignment` - Index-aligned agent and item lists of equal length
//! - `ActiveSet` - The agents present and items needed this period,
//!   reconciled to equal size with placeholders or explicit skips

mod assignment;
mod errors;
mod roster;

pub use assignment::Assignment;
pub use errors::{AssignmentError, RosterError};
pub use roster::ActiveSet;
