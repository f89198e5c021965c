//! Exchange Module - Voluntary cyclic swaps and the improvement loop.
//!
//! # Components
//!
//! - `ExchangeSearch` - Depth-first search for the most improving exchange
//!   cycle reachable from one agent
//! - `ImprovementEngine` - Applies discovered cycles until no asker finds one
//!
//! Every applied cycle leaves each participant with a cost no higher than
//! before and strictly lowers the total, so the loop converges. The result
//! is a local improvement over the starting assignment, not a global optimum.

mod engine;
mod errors;
mod search;

pub use engine::{Askers, ImprovementEngine, ImprovementOutcome};
pub use errors::ExchangeError;
pub use search::{ExchangeCycle, ExchangeSearch, SearchMode, IMPROVEMENT_EPSILON};
