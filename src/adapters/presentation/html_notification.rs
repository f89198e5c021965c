//! HTML notification renderer.
//!
//! Produces the weekly announcement page: a title dated with the Friday of
//! the period's week, a greeting, where the week falls in the cycle, the
//! Name/Chore table, a link to the preference sheet and a sign-off.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt::Write as _;

use crate::ports::{NotificationRenderer, PeriodNotice, RenderError};

const TABLE_STYLE: &str = "table {border-collapse: collapse;}\
td {border: 1px solid #ddd;}\
th{background-color: skyblue;}\
tr:nth-child(even){background-color: #f2f2f2;}";

/// Renders the announcement as a standalone HTML page.
#[derive(Debug, Clone)]
pub struct HtmlNotificationRenderer {
    sheet_link: Option<String>,
    sign_off: String,
}

impl HtmlNotificationRenderer {
    pub fn new(sheet_link: Option<String>, sign_off: impl Into<String>) -> Self {
        Self {
            sheet_link,
            sign_off: sign_off.into(),
        }
    }
}

impl Default for HtmlNotificationRenderer {
    fn default() -> Self {
        Self::new(None, "House Manager")
    }
}

impl NotificationRenderer for HtmlNotificationRenderer {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, notice: PeriodNotice<'_>) -> Result<String, RenderError> {
        let date = friday_of(notice.period.period_anchor).format("%m/%d");
        let mut page = String::new();

        write!(
            page,
            "<html><head><title>Chores {date}</title></head>\
             <h1>Chore Assignments {date}</h1>\
             Hi Housemates,<br/><br/>\
             Below are this weekend's chore assignments!<br/>"
        )?;

        if notice.period.is_last_in_cycle() {
            page.push_str(
                "(Last week of this cycle, so make sure once-per-rotation items get done!)",
            );
        } else {
            write!(
                page,
                "(Week #{} of this chore cycle.)",
                notice.period.week_number()
            )?;
        }
        page.push_str("<br/><br/>");

        page.push_str("<table><tr><th>Name</th><th>Chore</th></tr>");
        for (agent, item) in notice.assignment.pairs() {
            write!(
                page,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(agent.as_str()),
                escape(item.as_str())
            )?;
        }
        page.push_str("</table><br/>");

        if let Some(link) = &self.sheet_link {
            write!(
                page,
                "Your <a href='{}'>chore preferences</a> can be updated at any time.<br/><br/>",
                escape(link)
            )?;
        }

        write!(
            page,
            "Cheers,<br/>{}<style>{}</style></html>",
            escape(&self.sign_off),
            TABLE_STYLE
        )?;

        Ok(page)
    }
}

/// Friday of the week containing `date`.
fn friday_of(date: NaiveDate) -> NaiveDate {
    let offset = 4 - i64::from(date.weekday().num_days_from_monday());
    date + Duration::days(offset)
}

pub(super) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
