use std::time::Duration;

use serde::{Serialize, Serializer};

/// How long the host may wait for each operation before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceTimeouts {
  #[serde(serialize_with = "as_secs")]
  pub create: Duration,
  #[serde(serialize_with = "as_secs")]
  pub read: Duration,
  #[serde(serialize_with = "as_secs")]
  pub update: Duration,
  #[serde(serialize_with = "as_secs")]
  pub delete: Duration,
}

impl Default for ResourceTimeouts {
  fn default() -> Self {
    Self {
      create: Duration::from_secs(30 * 60),
      read: Duration::from_secs(5 * 60),
      update: Duration::from_secs(30 * 60),
      delete: Duration::from_secs(30 * 60),
    }
  }
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u64(duration.as_secs())
}
