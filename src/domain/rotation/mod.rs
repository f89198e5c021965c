//! Rotation Module - Period arithmetic and per-period baselines.
//!
//! # Components
//!
//! - `RotaCalendar` / `PeriodInfo` - Which period and cycle a date falls in
//! - `rotate_right` - Modulo-indexed circular rotation of a sequence
//! - `CycleBaselineBuilder` - Starting assignment for a period, either seeded
//!   fresh at a cycle start or carried over from the cycle's opening record

mod baseline;
mod calendar;
mod errors;
mod rotate;

pub use baseline::{Baseline, BaselineKind, CycleBaselineBuilder, DisplacedSet};
pub use calendar::{PeriodInfo, RotaCalendar, DEFAULT_CYCLE_LENGTH, DEFAULT_EPOCH};
pub use errors::{BaselineError, CalendarError};
pub use rotate::rotate_right;
