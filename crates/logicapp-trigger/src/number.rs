//! Lenient integer deserialization.
//!
//! Documents that went through a generic JSON layer may carry integers as
//! floats (`1.0`), so both forms are accepted and truncated to an integer.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Number;

fn to_i64<E: de::Error>(n: &Number) -> Result<i64, E> {
  n.as_i64()
    .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
    .ok_or_else(|| E::custom(format!("expected an integer, got {n}")))
}

fn to_u32<E: de::Error>(n: &Number) -> Result<u32, E> {
  let value = to_i64::<E>(n)?;
  u32::try_from(value).map_err(|_| E::custom(format!("expected a non-negative integer, got {n}")))
}

pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  let n = Number::deserialize(deserializer)?;
  to_i64(&n)
}

pub(crate) fn optional_integer_list<'de, D>(deserializer: D) -> Result<Option<Vec<u32>>, D::Error>
where
  D: Deserializer<'de>,
{
  let numbers = Option::<Vec<Number>>::deserialize(deserializer)?;
  numbers
    .map(|list| {
      list
        .iter()
        .map(to_u32::<D::Error>)
        .collect::<Result<Vec<u32>, D::Error>>()
    })
    .transpose()
}
