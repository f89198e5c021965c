//! History records and the line-oriented history format.

use chrono::NaiveDate;

use crate::domain::assignment::Assignment;
use crate::domain::foundation::{AgentId, ItemId};

use super::HistoryError;

/// Date format of the first field of every history line.
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d";

/// The assignment in force for the period anchored at `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    pub assignment: Assignment,
}

impl HistoryRecord {
    pub fn new(date: NaiveDate, assignment: Assignment) -> Self {
        Self { date, assignment }
    }

    /// Formats the record as a history line, without the trailing newline.
    pub fn to_line(&self) -> String {
        let mut line = self.date.format(HISTORY_DATE_FORMAT).to_string();
        line.push(',');
        let pairs: Vec<String> = self
            .assignment
            .pairs()
            .map(|(agent, item)| format!("{}:{}", agent, item))
            .collect();
        line.push_str(&pairs.join(","));
        line
    }

    /// Parses one history line. `line_no` is used for error reporting only.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, HistoryError> {
        let (date, rest) = line
            .split_once(',')
            .ok_or_else(|| HistoryError::malformed(line_no, "missing ',' after date"))?;

        let date = NaiveDate::parse_from_str(date.trim(), HISTORY_DATE_FORMAT).map_err(|e| {
            HistoryError::malformed(line_no, format!("invalid date '{}': {}", date.trim(), e))
        })?;

        let mut pairs = Vec::new();
        if !rest.trim().is_empty() {
            for entry in rest.split(',') {
                let (agent, item) = entry.trim().split_once(':').ok_or_else(|| {
                    HistoryError::malformed(line_no, format!("expected NAME:ITEM, got '{}'", entry))
                })?;
                let agent = AgentId::new(agent.trim())
                    .map_err(|e| HistoryError::malformed(line_no, e.to_string()))?;
                let item = ItemId::new(item.trim())
                    .map_err(|e| HistoryError::malformed(line_no, e.to_string()))?;
                pairs.push((agent, item));
            }
        }

        let assignment = Assignment::from_pairs(pairs)
            .map_err(|e| HistoryError::malformed(line_no, e.to_string()))?;

        Ok(Self { date, assignment })
    }
}

/// Ordered sequence of history records, at most one per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    /// Creates an empty history.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the full history text. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Any malformed line, or a date recorded twice, is fatal.
    pub fn parse(text: &str) -> Result<Self, HistoryError> {
        let mut history = History::empty();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = HistoryRecord::parse_line(line, i + 1)?;
            if history.find(record.date).is_some() {
                return Err(HistoryError::malformed(
                    i + 1,
                    format!("date {} recorded twice", record.date),
                ));
            }
            history.records.push(record);
        }
        Ok(history)
    }

    /// Renders the history in file format, one newline-terminated line per record.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for record in &self.records {
            text.push_str(&record.to_line());
            text.push('\n');
        }
        text
    }

    /// Returns the record for `date`, if any.
    pub fn find(&self, date: NaiveDate) -> Option<&HistoryRecord> {
        self.records.iter().rev().find(|r| r.date == date)
    }

    /// Inserts `record`, replacing an existing record with the same date in place.
    ///
    /// Returns true if an existing record was overwritten.
    pub fn upsert(&mut self, record: HistoryRecord) -> bool {
        match self.records.iter_mut().find(|r| r.date == record.date) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.records.push(record);
                false
            }
        }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
