//! Presentation adapters: charts and the weekly announcement.

mod html_notification;
mod svg_chart;

pub use html_notification::HtmlNotificationRenderer;
pub use svg_chart::SvgChartRenderer;
