//! Preferences Module - The per-run misery table and the cost metric.
//!
//! # Components
//!
//! - `PreferenceModel` - Immutable agent x item cost table, validated at load
//! - `CostMetric` - Pure total/average cost functions over an assignment
//!
//! Lower cost means a more preferred item. Costs are validated to lie within
//! `[1, N]` where `N` is the number of catalogued items, placeholder included.

mod cost_metric;
mod errors;
mod model;

pub use cost_metric::{CostBounds, CostMetric};
pub use errors::PreferenceError;
pub use model::{PreferenceModel, PreferenceModelBuilder, DEFAULT_PLACEHOLDER};
