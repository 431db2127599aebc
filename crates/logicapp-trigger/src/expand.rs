use logicapp_config::{RecurrenceTriggerConfig, Schedule};

use crate::types::{Recurrence, RecurrenceSchedule, RecurrenceTrigger};

/// Build the trigger document for `config`.
///
/// `time_zone` is only carried over when `start_time` is set; a time zone on
/// its own is dropped, not rejected.
pub fn expand(config: &RecurrenceTriggerConfig) -> RecurrenceTrigger {
  let (start_time, time_zone) = match &config.start_time {
    Some(start_time) => (Some(start_time.clone()), config.time_zone.clone()),
    None => (None, None),
  };

  RecurrenceTrigger::new(Recurrence {
    frequency: config.frequency,
    interval: config.interval,
    start_time,
    time_zone,
    schedule: config.schedule.as_ref().map(expand_schedule),
  })
}

/// Convert each populated set into a list. Empty sets become absent keys.
pub fn expand_schedule(schedule: &Schedule) -> RecurrenceSchedule {
  fn non_empty<T>(list: Vec<T>) -> Option<Vec<T>> {
    (!list.is_empty()).then_some(list)
  }

  RecurrenceSchedule {
    hours: non_empty(schedule.at_these_hours.iter().copied().collect()),
    minutes: non_empty(schedule.at_these_minutes.iter().copied().collect()),
    week_days: non_empty(schedule.on_these_days.iter().copied().collect()),
  }
}
