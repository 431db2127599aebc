use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::Weekday;

/// Fine-grained constraints on when a recurrence fires.
///
/// All three fields are sets: order is irrelevant and duplicates collapse.
/// A schedule is only valid if at least one of them is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
  /// Hours of the day, 0-23.
  #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
  pub at_these_hours: BTreeSet<u32>,

  /// Minutes of the hour, 0-59.
  #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
  pub at_these_minutes: BTreeSet<u32>,

  #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
  pub on_these_days: BTreeSet<Weekday>,
}

impl Schedule {
  pub fn is_empty(&self) -> bool {
    self.at_these_hours.is_empty()
      && self.at_these_minutes.is_empty()
      && self.on_these_days.is_empty()
  }

  pub fn with_hours(mut self, hours: impl IntoIterator<Item = u32>) -> Self {
    self.at_these_hours.extend(hours);
    self
  }

  pub fn with_minutes(mut self, minutes: impl IntoIterator<Item = u32>) -> Self {
    self.at_these_minutes.extend(minutes);
    self
  }

  pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
    self.on_these_days.extend(days);
    self
  }
}
