use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {field} to be one of [{expected}], got {value:?}")]
pub struct ParseEnumError {
  pub field: &'static str,
  pub expected: String,
  pub value: String,
}

/// How often a recurrence trigger fires, in units of `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
  Month,
  Week,
  Day,
  Hour,
  Minute,
  Second,
}

impl Frequency {
  pub const ALL: [Frequency; 6] = [
    Frequency::Month,
    Frequency::Week,
    Frequency::Day,
    Frequency::Hour,
    Frequency::Minute,
    Frequency::Second,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Frequency::Month => "Month",
      Frequency::Week => "Week",
      Frequency::Day => "Day",
      Frequency::Hour => "Hour",
      Frequency::Minute => "Minute",
      Frequency::Second => "Second",
    }
  }
}

impl fmt::Display for Frequency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Frequency {
  type Err = ParseEnumError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|f| f.as_str() == s)
      .ok_or_else(|| ParseEnumError {
        field: "frequency",
        expected: join(Self::ALL.iter().map(Frequency::as_str)),
        value: s.to_string(),
      })
  }
}

/// Day of the week a scheduled recurrence fires on.
///
/// Ordering follows the week (Monday first), so sets of days sort naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
  Sunday,
}

impl Weekday {
  pub const ALL: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Weekday::Monday => "Monday",
      Weekday::Tuesday => "Tuesday",
      Weekday::Wednesday => "Wednesday",
      Weekday::Thursday => "Thursday",
      Weekday::Friday => "Friday",
      Weekday::Saturday => "Saturday",
      Weekday::Sunday => "Sunday",
    }
  }
}

impl fmt::Display for Weekday {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Weekday {
  type Err = ParseEnumError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|d| d.as_str() == s)
      .ok_or_else(|| ParseEnumError {
        field: "on_these_days",
        expected: join(Self::ALL.iter().map(Weekday::as_str)),
        value: s.to_string(),
      })
  }
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
  values.collect::<Vec<_>>().join(", ")
}
