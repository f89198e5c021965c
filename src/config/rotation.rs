//! Rotation schedule configuration

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::foundation::ItemId;
use crate::domain::rotation::{RotaCalendar, DEFAULT_CYCLE_LENGTH};

use super::error::ValidationError;

/// Cycle timing and which chores move every week
#[derive(Debug, Clone, Deserialize)]
pub struct RotationConfig {
    /// Monday from which periods are counted
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,

    /// Periods per cycle
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,

    /// Items bumped to another agent every week, in bump order
    #[serde(default = "default_weekly_rotating")]
    pub weekly_rotating: Vec<String>,
}

impl RotationConfig {
    pub fn calendar(&self) -> Result<RotaCalendar, ValidationError> {
        RotaCalendar::new(self.epoch, self.cycle_length)
            .map_err(|_| ValidationError::InvalidCycleLength)
    }

    pub fn weekly_rotating_items(&self) -> Result<Vec<ItemId>, ValidationError> {
        self.weekly_rotating
            .iter()
            .map(|name| {
                ItemId::new(name.trim()).map_err(|_| ValidationError::InvalidItemName(name.clone()))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.calendar()?;
        self.weekly_rotating_items()?;
        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            cycle_length: default_cycle_length(),
            weekly_rotating: default_weekly_rotating(),
        }
    }
}

fn default_epoch() -> NaiveDate {
    RotaCalendar::default().epoch()
}

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}

fn default_weekly_rotating() -> Vec<String> {
    vec!["Wild".to_string(), "Lawn".to_string(), "Dishes".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_defaults() {
        let config = RotationConfig::default();
        assert_eq!(config.epoch, NaiveDate::from_ymd_opt(2018, 1, 8).unwrap());
        assert_eq!(config.cycle_length, 4);
        assert_eq!(config.weekly_rotating, vec!["Wild", "Lawn", "Dishes"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cycle_length_is_invalid() {
        let config = RotationConfig {
            cycle_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCycleLength));
    }

    #[test]
    fn test_bad_item_name_is_invalid() {
        let config = RotationConfig {
            weekly_rotating: vec!["Lawn".to_string(), "".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidItemName(_))
        ));
    }
}
