//! Rota calendar - mapping dates onto periods and cycles.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::CalendarError;

/// Arbitrary Monday long ago from which periods are counted.
pub const DEFAULT_EPOCH: (i32, u32, u32) = (2018, 1, 8);

/// Periods per cycle.
pub const DEFAULT_CYCLE_LENGTH: u32 = 4;

const DAYS_PER_PERIOD: i64 = 7;

/// Weekly periods grouped into fixed-length cycles, counted from an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotaCalendar {
    epoch: NaiveDate,
    cycle_length: u32,
}

impl RotaCalendar {
    pub fn new(epoch: NaiveDate, cycle_length: u32) -> Result<Self, CalendarError> {
        if cycle_length == 0 {
            return Err(CalendarError::ZeroCycleLength);
        }
        Ok(Self {
            epoch,
            cycle_length,
        })
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    /// Locates `today` within the period and cycle grid.
    ///
    /// Dates before the epoch land in negative-numbered periods; indices use
    /// floor division so every date still has a well-defined anchor.
    pub fn period_info(&self, today: NaiveDate) -> PeriodInfo {
        let days = (today - self.epoch).num_days();
        let cycle_days = DAYS_PER_PERIOD * i64::from(self.cycle_length);

        let period_index = days.div_euclid(DAYS_PER_PERIOD);
        let cycle_index = days.div_euclid(cycle_days);

        PeriodInfo {
            period_index,
            cycle_index,
            position_in_cycle: period_index.rem_euclid(i64::from(self.cycle_length)) as u32,
            cycle_length: self.cycle_length,
            period_anchor: self.epoch + Duration::days(DAYS_PER_PERIOD * period_index),
            cycle_anchor: self.epoch + Duration::days(cycle_days * cycle_index),
        }
    }
}

impl Default for RotaCalendar {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_EPOCH;
        Self {
            epoch: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            cycle_length: DEFAULT_CYCLE_LENGTH,
        }
    }
}

/// Where a date falls in the rota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// Periods elapsed since the epoch.
    pub period_index: i64,
    /// Cycles elapsed since the epoch.
    pub cycle_index: i64,
    /// 0-based position of this period within its cycle.
    pub position_in_cycle: u32,
    pub cycle_length: u32,
    /// First day (Monday) of this period.
    pub period_anchor: NaiveDate,
    /// First day of the first period of this cycle.
    pub cycle_anchor: NaiveDate,
}

impl PeriodInfo {
    pub fn is_cycle_start(&self) -> bool {
        self.position_in_cycle == 0
    }

    pub fn is_last_in_cycle(&self) -> bool {
        self.position_in_cycle + 1 == self.cycle_length
    }

    /// 1-based period number within the cycle, for display.
    pub fn week_number(&self) -> u32 {
        self.position_in_cycle + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_epoch_is_a_monday() {
        assert_eq!(RotaCalendar::default().epoch().weekday(), Weekday::Mon);
    }

    #[test]
    fn epoch_is_first_period_of_first_cycle() {
        let info = RotaCalendar::default().period_info(date(2018, 1, 8));

        assert_eq!(info.period_index, 0);
        assert_eq!(info.cycle_index, 0);
        assert!(info.is_cycle_start());
        assert_eq!(info.period_anchor, date(2018, 1, 8));
    }

    #[test]
    fn mid_week_maps_to_monday_anchor() {
        let info = RotaCalendar::default().period_info(date(2018, 1, 19));

        assert_eq!(info.period_index, 1);
        assert_eq!(info.position_in_cycle, 1);
        assert_eq!(info.period_anchor, date(2018, 1, 15));
        assert_eq!(info.cycle_anchor, date(2018, 1, 8));
        assert_eq!(info.week_number(), 2);
    }

    #[test]
    fn last_week_of_cycle() {
        let info = RotaCalendar::default().period_info(date(2018, 1, 29));

        assert_eq!(info.period_index, 3);
        assert!(info.is_last_in_cycle());
        assert!(!info.is_cycle_start());
    }

    #[test]
    fn next_cycle_starts_after_cycle_length_periods() {
        let info = RotaCalendar::default().period_info(date(2018, 2, 6));

        assert_eq!(info.period_index, 4);
        assert_eq!(info.cycle_index, 1);
        assert!(info.is_cycle_start());
        assert_eq!(info.cycle_anchor, date(2018, 2, 5));
    }

    #[test]
    fn dates_before_epoch_floor_to_earlier_periods() {
        let info = RotaCalendar::default().period_info(date(2018, 1, 7));

        assert_eq!(info.period_index, -1);
        assert_eq!(info.cycle_index, -1);
        assert_eq!(info.position_in_cycle, 3);
        assert_eq!(info.period_anchor, date(2018, 1, 1));
    }

    #[test]
    fn custom_cycle_length() {
        let calendar = RotaCalendar::new(date(2018, 1, 8), 2).unwrap();
        let info = calendar.period_info(date(2018, 1, 22));

        assert_eq!(info.cycle_index, 1);
        assert!(info.is_cycle_start());
    }

    #[test]
    fn zero_cycle_length_is_rejected() {
        assert_eq!(
            RotaCalendar::new(date(2018, 1, 8), 0),
            Err(CalendarError::ZeroCycleLength)
        );
    }
}
