//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `preferences` - Preference sheet over HTTP or from a local file
//! - `history` - History file with dated backups, and an in-memory store
//! - `console` - Terminal and scripted situation prompters
//! - `presentation` - SVG misery charts and the HTML announcement
//! - `output` - Writing rendered documents to disk

pub mod console;
pub mod history;
pub mod output;
pub mod presentation;
pub mod preferences;

pub use console::{ConsolePrompter, ScriptedPrompter};
pub use history::{FileHistoryStore, InMemoryHistoryStore};
pub use output::FileOutputWriter;
pub use presentation::{HtmlNotificationRenderer, SvgChartRenderer};
pub use preferences::{FilePreferenceSource, HttpPreferenceSource};
