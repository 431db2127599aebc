use logicapp_config::{RecurrenceTriggerConfig, Schedule};
use serde::Deserialize;
use serde_json::Value;

use crate::types::{DocumentError, Recurrence, RecurrenceSchedule};

/// Pull the typed `recurrence` object out of a fetched trigger document.
pub fn parse_recurrence(document: &Value) -> Result<Recurrence, DocumentError> {
  let raw = match document.get("recurrence") {
    None | Some(Value::Null) => return Err(DocumentError::MissingRecurrence),
    Some(raw) => raw,
  };

  if !raw.is_object() {
    return Err(DocumentError::InvalidRecurrence {
      message: format!("expected an object, got {raw}"),
    });
  }

  Recurrence::deserialize(raw).map_err(|e| DocumentError::InvalidRecurrence {
    message: e.to_string(),
  })
}

/// Write a fetched recurrence into `target`.
///
/// `frequency` and `interval` are always overwritten. The optional fields are
/// only overwritten when the service returned them, so values the service
/// does not echo back (such as a `time_zone` sent without `start_time`) keep
/// their previous state.
pub fn flatten(recurrence: &Recurrence, target: &mut RecurrenceTriggerConfig) {
  target.frequency = recurrence.frequency;
  target.interval = recurrence.interval;

  if let Some(start_time) = &recurrence.start_time {
    target.start_time = Some(start_time.clone());
  }

  if let Some(time_zone) = &recurrence.time_zone {
    target.time_zone = Some(time_zone.clone());
  }

  if let Some(schedule) = &recurrence.schedule {
    target.schedule = Some(flatten_schedule(schedule));
  }
}

pub fn flatten_schedule(schedule: &RecurrenceSchedule) -> Schedule {
  Schedule::default()
    .with_hours(schedule.hours.iter().flatten().copied())
    .with_minutes(schedule.minutes.iter().flatten().copied())
    .with_days(schedule.week_days.iter().flatten().copied())
}
