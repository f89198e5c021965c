//! PublishPeriodHandler - renders and writes the chart and announcement.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::preferences::PreferenceModel;
use crate::ports::{
    ChartRenderer, NotificationRenderer, OutputWriter, PeriodNotice, RenderError, WriteError,
};

use super::PeriodPlan;

/// Command to publish a planned period.
#[derive(Debug, Clone)]
pub struct PublishPeriodCommand {
    pub plan: PeriodPlan,
    pub chart_path: PathBuf,
    pub notification_path: PathBuf,
}

/// Paths of the written documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPeriodResult {
    pub chart_path: PathBuf,
    pub notification_path: PathBuf,
}

/// Error type for publishing.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Handler for publishing a period's outcome.
pub struct PublishPeriodHandler {
    chart_renderer: Arc<dyn ChartRenderer>,
    notification_renderer: Arc<dyn NotificationRenderer>,
    output_writer: Arc<dyn OutputWriter>,
}

impl PublishPeriodHandler {
    pub fn new(
        chart_renderer: Arc<dyn ChartRenderer>,
        notification_renderer: Arc<dyn NotificationRenderer>,
        output_writer: Arc<dyn OutputWriter>,
    ) -> Self {
        Self {
            chart_renderer,
            notification_renderer,
            output_writer,
        }
    }

    pub async fn handle(
        &self,
        model: &PreferenceModel,
        cmd: PublishPeriodCommand,
    ) -> Result<PublishPeriodResult, PublishError> {
        let plan = &cmd.plan;

        // 1. Chart: before/after when anything moved, otherwise the final state alone
        let chart = if plan.initial != plan.final_assignment {
            self.chart_renderer
                .render_comparison(model, &plan.initial, &plan.final_assignment)?
        } else {
            self.chart_renderer.render_single(model, &plan.final_assignment)?
        };

        // 2. Announcement
        let notification = self.notification_renderer.render(PeriodNotice {
            assignment: &plan.final_assignment,
            period: &plan.period,
        })?;

        // 3. Write both
        let chart_path = self.output_writer.write(&cmd.chart_path, &chart).await?;
        let notification_path = self
            .output_writer
            .write(&cmd.notification_path, &notification)
            .await?;

        info!(
            chart = %chart_path.display(),
            notification = %notification_path.display(),
            "Published period"
        );

        Ok(PublishPeriodResult {
            chart_path,
            notification_path,
        })
    }
}
