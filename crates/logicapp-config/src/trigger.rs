use serde::{Deserialize, Serialize};

use crate::enums::Frequency;
use crate::schedule::Schedule;

/// Declarative configuration of a recurrence trigger attached to a Logic App
/// workflow.
///
/// `name` and `logic_app_id` identify the trigger; changing either means the
/// trigger has to be recreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceTriggerConfig {
  /// Trigger name within the parent workflow.
  pub name: String,

  /// Resource ID of the parent workflow.
  pub logic_app_id: String,

  pub frequency: Frequency,

  /// Number of `frequency` units between firings. Any integer is accepted.
  pub interval: i64,

  /// RFC3339 timestamp of the first firing.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_time: Option<String>,

  /// Only sent to the service together with `start_time`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_zone: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schedule: Option<Schedule>,
}

impl RecurrenceTriggerConfig {
  pub fn new(
    name: impl Into<String>,
    logic_app_id: impl Into<String>,
    frequency: Frequency,
    interval: i64,
  ) -> Self {
    Self {
      name: name.into(),
      logic_app_id: logic_app_id.into(),
      frequency,
      interval,
      start_time: None,
      time_zone: None,
      schedule: None,
    }
  }

  pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
    self.start_time = Some(start_time.into());
    self
  }

  pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
    self.time_zone = Some(time_zone.into());
    self
  }

  pub fn with_schedule(mut self, schedule: Schedule) -> Self {
    self.schedule = Some(schedule);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enums::Weekday;

  #[test]
  fn test_deserialize_minimal_config() {
    let json = r#"{
      "name": "every-day",
      "logic_app_id": "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg/providers/Microsoft.Logic/workflows/wf",
      "frequency": "Day",
      "interval": 1
    }"#;

    let config: RecurrenceTriggerConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.name, "every-day");
    assert_eq!(config.frequency, Frequency::Day);
    assert_eq!(config.interval, 1);
    assert!(config.start_time.is_none());
    assert!(config.time_zone.is_none());
    assert!(config.schedule.is_none());
  }

  #[test]
  fn test_deserialize_rejects_unknown_frequency() {
    let json = r#"{"name": "t", "logic_app_id": "x", "frequency": "Year", "interval": 1}"#;
    assert!(serde_json::from_str::<RecurrenceTriggerConfig>(json).is_err());
  }

  #[test]
  fn test_serialize_omits_unset_fields() {
    let config = RecurrenceTriggerConfig::new("t", "id", Frequency::Week, 2)
      .with_schedule(Schedule::default().with_days([Weekday::Friday]));

    let value = serde_json::to_value(&config).unwrap();
    assert!(value.get("start_time").is_none());
    assert!(value.get("time_zone").is_none());
    assert_eq!(value["schedule"]["on_these_days"], serde_json::json!(["Friday"]));
    assert!(value["schedule"].get("at_these_hours").is_none());
  }
}
