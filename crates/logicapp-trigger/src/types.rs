use logicapp_config::{Frequency, Weekday};
use serde::{Deserialize, Serialize};

use crate::number;

/// Value of the `type` key of every recurrence trigger document.
pub const RECURRENCE_TRIGGER_TYPE: &str = "Recurrence";

/// Error type for reading a fetched trigger document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
  /// The document has no `recurrence` key, or it is `null`.
  #[error("`recurrence` was nil")]
  MissingRecurrence,

  /// `recurrence` exists but is not a well-formed recurrence object.
  #[error("parsing `recurrence`: {message}")]
  InvalidRecurrence { message: String },
}

/// A recurrence trigger as stored in a workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceTrigger {
  #[serde(rename = "type")]
  pub trigger_type: String,

  pub recurrence: Recurrence,
}

impl RecurrenceTrigger {
  pub fn new(recurrence: Recurrence) -> Self {
    Self {
      trigger_type: RECURRENCE_TRIGGER_TYPE.to_string(),
      recurrence,
    }
  }

  /// Generic JSON form, as handed to a workflow client.
  pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(self)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
  pub frequency: Frequency,

  #[serde(deserialize_with = "number::integer")]
  pub interval: i64,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_time: Option<String>,

  /// Never present without `start_time` in documents built by [`crate::expand`].
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_zone: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schedule: Option<RecurrenceSchedule>,
}

/// Wire form of a schedule. Keys with nothing to say are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceSchedule {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "number::optional_integer_list"
  )]
  pub hours: Option<Vec<u32>>,

  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "number::optional_integer_list"
  )]
  pub minutes: Option<Vec<u32>>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub week_days: Option<Vec<Weekday>>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_interval_accepts_float() {
    let recurrence: Recurrence =
      serde_json::from_value(json!({"frequency": "Hour", "interval": 3.0})).unwrap();
    assert_eq!(recurrence.interval, 3);
  }

  #[test]
  fn test_interval_rejects_non_number() {
    let result =
      serde_json::from_value::<Recurrence>(json!({"frequency": "Hour", "interval": "3"}));
    assert!(result.is_err());
  }

  #[test]
  fn test_schedule_accepts_float_hours() {
    let schedule: RecurrenceSchedule =
      serde_json::from_value(json!({"hours": [9.0, 17], "minutes": [30]})).unwrap();
    assert_eq!(schedule.hours, Some(vec![9, 17]));
    assert_eq!(schedule.minutes, Some(vec![30]));
    assert_eq!(schedule.week_days, None);
  }

  #[test]
  fn test_schedule_ignores_unknown_keys() {
    let schedule: RecurrenceSchedule =
      serde_json::from_value(json!({"monthDays": [1, 15], "weekDays": ["Sunday"]})).unwrap();
    assert_eq!(schedule.week_days, Some(vec![Weekday::Sunday]));
    assert_eq!(schedule.hours, None);
  }

  #[test]
  fn test_serialize_uses_camel_case() {
    let trigger = RecurrenceTrigger::new(Recurrence {
      frequency: Frequency::Day,
      interval: 1,
      start_time: Some("2020-01-01T00:00:00Z".to_string()),
      time_zone: Some("UTC".to_string()),
      schedule: Some(RecurrenceSchedule {
        week_days: Some(vec![Weekday::Monday]),
        ..Default::default()
      }),
    });

    assert_eq!(
      trigger.to_value().unwrap(),
      json!({
        "type": "Recurrence",
        "recurrence": {
          "frequency": "Day",
          "interval": 1,
          "startTime": "2020-01-01T00:00:00Z",
          "timeZone": "UTC",
          "schedule": {"weekDays": ["Monday"]}
        }
      })
    );
  }
}
