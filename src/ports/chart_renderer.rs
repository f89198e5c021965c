//! Chart Renderer Port - Visualising misery per agent.

use crate::domain::assignment::Assignment;
use crate::domain::preferences::{PreferenceError, PreferenceModel};

/// Errors that can occur while rendering presentation output
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Before and after assignments cover different agents")]
    AgentsDiffer,

    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    #[error("Failed to format document")]
    Format(#[from] std::fmt::Error),
}

/// Port for rendering cost charts
pub trait ChartRenderer: Send + Sync {
    /// File extension of the produced document, without the dot
    fn extension(&self) -> &'static str;

    /// Chart of each agent's cost under one assignment
    fn render_single(
        &self,
        model: &PreferenceModel,
        assignment: &Assignment,
    ) -> Result<String, RenderError>;

    /// Side-by-side chart of each agent's cost before and after improvement
    ///
    /// # Errors
    /// Returns `RenderError::AgentsDiffer` unless both assignments list the
    /// same agents in the same order
    fn render_comparison(
        &self,
        model: &PreferenceModel,
        before: &Assignment,
        after: &Assignment,
    ) -> Result<String, RenderError>;
}
