//! History Module - One recorded assignment per period.
//!
//! The history file holds one line per period:
//!
//! ```text
//! YYYY-MM-DD,NAME1:ITEM1,NAME2:ITEM2,...
//! ```
//!
//! where the date is the period's anchor (its Monday). Lines are kept in
//! date order of insertion; re-recording a date replaces its line.

mod errors;
mod record;

pub use errors::HistoryError;
pub use record::{History, HistoryRecord, HISTORY_DATE_FORMAT};
