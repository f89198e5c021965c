//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input Ports
//!
//! - `PreferenceSource` - Retrieves the preference sheet
//! - `SituationPrompter` - Asks who is absent and which items are skipped
//!
//! ## Persistence Ports
//!
//! - `HistoryStore` - Loads and saves the assignment history
//! - `OutputWriter` - Persists rendered documents
//!
//! ## Presentation Ports
//!
//! - `ChartRenderer` - Misery charts
//! - `NotificationRenderer` - The weekly announcement

mod chart_renderer;
mod history_store;
mod notification_renderer;
mod output_writer;
mod preference_source;
mod situation_prompter;

pub use chart_renderer::{ChartRenderer, RenderError};
pub use history_store::{HistoryStore, StorageError};
pub use notification_renderer::{NotificationRenderer, PeriodNotice};
pub use output_writer::{OutputWriter, WriteError};
pub use preference_source::{PreferenceSource, SourceError};
pub use situation_prompter::{PromptError, SituationPrompter};
