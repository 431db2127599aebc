
use crate::resource_id::{ResourceIdError, TriggerId};
use crate::time_zone::is_valid_time_zone;
use crate::trigger::RecurrenceTriggerConfig;

const MAX_HOUR: u32 = 23;
const MAX_MINUTE: u32 = 59;

/// A single configuration constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
  #[error("`name` must not be empty")]
  EmptyName,

  #[error("`logic_app_id` is not a valid workflow resource ID: {0}")]
  InvalidLogicAppId(#[source] ResourceIdError),

  #[error("`start_time` {value:?} is not a valid RFC3339 timestamp: {message}")]
  InvalidStartTime { value: String, message: String },

  #[error("`time_zone` {0:?} is not a supported time zone")]
  UnsupportedTimeZone(String),

  #[error("`schedule.at_these_hours` contains {0}, expected a value between 0 and 23")]
  HourOutOfRange(u32),

  #[error("`schedule.at_these_minutes` contains {0}, expected a value between 0 and 59")]
  MinuteOutOfRange(u32),

  #[error(
    "`schedule` requires at least one of `at_these_hours`, `at_these_minutes`, `on_these_days`"
  )]
  EmptySchedule,
}

/// Every violation found in one configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration: {}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
  pub fn errors(&self) -> &[ValidationError] {
    &self.0
  }

  pub fn contains(&self, error: &ValidationError) -> bool {
    self.0.contains(error)
  }
}

fn join_messages(errors: &[ValidationError]) -> String {
  errors
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

impl RecurrenceTriggerConfig {
  /// Check every field and cross-field constraint.
  ///
  /// Reports all violations rather than stopping at the first one.
  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if self.name.is_empty() {
      errors.push(ValidationError::EmptyName);
    }

    if let Err(e) = TriggerId::from_workflow_id(&self.logic_app_id, &self.name) {
      errors.push(ValidationError::InvalidLogicAppId(e));
    }

    if let Some(start_time) = &self.start_time
      && let Err(e) = chrono::DateTime::parse_from_rfc3339(start_time)
    {
      errors.push(ValidationError::InvalidStartTime {
        value: start_time.clone(),
        message: e.to_string(),
      });
    }

    if let Some(time_zone) = &self.time_zone
      && !is_valid_time_zone(time_zone)
    {
      errors.push(ValidationError::UnsupportedTimeZone(time_zone.clone()));
    }

    if let Some(schedule) = &self.schedule {
      if schedule.is_empty() {
        errors.push(ValidationError::EmptySchedule);
      }
      errors.extend(
        schedule
          .at_these_hours
          .iter()
          .filter(|h| **h > MAX_HOUR)
          .map(|h| ValidationError::HourOutOfRange(*h)),
      );
      errors.extend(
        schedule
          .at_these_minutes
          .iter()
          .filter(|m| **m > MAX_MINUTE)
          .map(|m| ValidationError::MinuteOutOfRange(*m)),
      );
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ValidationErrors(errors))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enums::{Frequency, Weekday};
  use crate::schedule::Schedule;

  const WORKFLOW_ID: &str =
    "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Logic/workflows/wf";

  fn config() -> RecurrenceTriggerConfig {
    RecurrenceTriggerConfig::new("trigger", WORKFLOW_ID, Frequency::Day, 1)
  }

  #[test]
  fn test_minimal_config_is_valid() {
    assert_eq!(config().validate(), Ok(()));
  }

  #[test]
  fn test_full_config_is_valid() {
    let config = config()
      .with_start_time("2020-01-01T00:00:00Z")
      .with_time_zone("UTC")
      .with_schedule(
        Schedule::default()
          .with_hours([0, 23])
          .with_minutes([0, 59])
          .with_days([Weekday::Monday]),
      );
    assert_eq!(config.validate(), Ok(()));
  }

  #[test]
  fn test_interval_is_not_bounded() {
    let mut config = config();
    config.interval = 0;
    assert!(config.validate().is_ok());
    config.interval = -5;
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_empty_schedule_rejected() {
    let err = config()
      .with_schedule(Schedule::default())
      .validate()
      .unwrap_err();
    assert_eq!(err.errors(), &[ValidationError::EmptySchedule]);
  }

  #[test]
  fn test_out_of_range_schedule_values() {
    let err = config()
      .with_schedule(Schedule::default().with_hours([24, 3]).with_minutes([60]))
      .validate()
      .unwrap_err();
    assert!(err.contains(&ValidationError::HourOutOfRange(24)));
    assert!(err.contains(&ValidationError::MinuteOutOfRange(60)));
    assert_eq!(err.errors().len(), 2);
  }

  #[test]
  fn test_bad_start_time() {
    let err = config()
      .with_start_time("2020-01-01 00:00")
      .validate()
      .unwrap_err();
    assert!(matches!(
      err.errors(),
      [ValidationError::InvalidStartTime { value, .. }] if value == "2020-01-01 00:00"
    ));
  }

  #[test]
  fn test_unsupported_time_zone() {
    let err = config()
      .with_start_time("2020-01-01T00:00:00Z")
      .with_time_zone("Mars Standard Time")
      .validate()
      .unwrap_err();
    assert_eq!(
      err.errors(),
      &[ValidationError::UnsupportedTimeZone("Mars Standard Time".to_string())]
    );
  }

  #[test]
  fn test_reports_every_violation() {
    let mut config = config().with_schedule(Schedule::default());
    config.name = String::new();
    config.logic_app_id = "/subscriptions/sub".to_string();

    let err = config.validate().unwrap_err();
    assert_eq!(err.errors().len(), 3);
    assert!(err.contains(&ValidationError::EmptyName));
    assert!(err.contains(&ValidationError::EmptySchedule));
    assert!(err.to_string().starts_with("invalid configuration: "));
  }

  #[test]
  fn test_messages_are_joined() {
    let errors = ValidationErrors(vec![ValidationError::EmptyName, ValidationError::EmptySchedule]);
    assert_eq!(
      errors.to_string(),
      format!(
        "invalid configuration: {}; {}",
        ValidationError::EmptyName,
        ValidationError::EmptySchedule
      )
    );
  }
}
