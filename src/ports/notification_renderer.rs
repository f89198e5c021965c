//! Notification Renderer Port - the weekly announcement.

use crate::domain::assignment::Assignment;
use crate::domain::rotation::PeriodInfo;

use super::RenderError;

/// Everything a notification shows.
#[derive(Debug, Clone, Copy)]
pub struct PeriodNotice<'a> {
    pub assignment: &'a Assignment,
    pub period: &'a PeriodInfo,
}

/// Port for rendering the announcement sent to every agent
pub trait NotificationRenderer: Send + Sync {
    /// File extension of the produced document, without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, notice: PeriodNotice<'_>) -> Result<String, RenderError>;
}
