//! Azure resource ID parsing.
//!
//! A resource ID is a `/`-separated list of key/value pairs:
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Logic/workflows/{wf}/triggers/{name}
//! ```

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceIdError {
  #[error("resource ID must not be empty")]
  Empty,

  #[error("the number of path segments is not divisible by 2 in {0:?}")]
  OddSegments(String),

  #[error("key/value cannot be empty strings in {0:?}")]
  EmptySegment(String),

  #[error("no subscription ID found in {0:?}")]
  MissingSubscription(String),

  #[error("no resource group found in {0:?}")]
  MissingResourceGroup(String),

  #[error("no `{segment}` segment found in {id:?}")]
  MissingSegment { segment: &'static str, id: String },
}

/// A parsed resource ID.
///
/// `subscriptions`, `resourceGroups` and `providers` are lifted into their own
/// fields; every other key/value pair lands in `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
  pub subscription_id: String,
  pub resource_group: String,
  pub provider: String,
  pub path: HashMap<String, String>,
}

impl ResourceId {
  pub fn parse(id: &str) -> Result<Self, ResourceIdError> {
    let trimmed = id.trim_matches('/');
    if trimmed.is_empty() {
      return Err(ResourceIdError::Empty);
    }

    let components: Vec<&str> = trimmed.split('/').collect();
    if components.len() % 2 != 0 {
      return Err(ResourceIdError::OddSegments(id.to_string()));
    }

    let mut path = HashMap::with_capacity(components.len() / 2);
    for pair in components.chunks_exact(2) {
      let (key, value) = (pair[0], pair[1]);
      if key.is_empty() || value.is_empty() {
        return Err(ResourceIdError::EmptySegment(id.to_string()));
      }
      path.insert(key.to_string(), value.to_string());
    }

    let subscription_id = path
      .remove("subscriptions")
      .ok_or_else(|| ResourceIdError::MissingSubscription(id.to_string()))?;

    // Some older APIs return the lowercased key.
    let resource_group = path
      .remove("resourceGroups")
      .or_else(|| path.remove("resourcegroups"))
      .unwrap_or_default();

    let provider = path.remove("providers").unwrap_or_default();

    Ok(Self {
      subscription_id,
      resource_group,
      provider,
      path,
    })
  }

  /// Value of a path segment, e.g. `workflows`.
  pub fn segment(&self, key: &str) -> Option<&str> {
    self.path.get(key).map(String::as_str)
  }
}

/// Identifies one trigger inside a workflow of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerId {
  pub subscription_id: String,
  pub resource_group: String,
  pub workflow_name: String,
  pub trigger_name: String,
}

impl TriggerId {
  pub fn new(
    subscription_id: impl Into<String>,
    resource_group: impl Into<String>,
    workflow_name: impl Into<String>,
    trigger_name: impl Into<String>,
  ) -> Self {
    Self {
      subscription_id: subscription_id.into(),
      resource_group: resource_group.into(),
      workflow_name: workflow_name.into(),
      trigger_name: trigger_name.into(),
    }
  }

  /// Parse a trigger resource ID (`.../workflows/{wf}/triggers/{name}`).
  pub fn parse(id: &str) -> Result<Self, ResourceIdError> {
    let parsed = ResourceId::parse(id)?;
    let trigger_name = required_segment(&parsed, "triggers", id)?;
    Self::for_workflow(&parsed, id, trigger_name)
  }

  /// Build the ID of trigger `trigger_name` on the workflow `workflow_id`.
  pub fn from_workflow_id(workflow_id: &str, trigger_name: &str) -> Result<Self, ResourceIdError> {
    let parsed = ResourceId::parse(workflow_id)?;
    Self::for_workflow(&parsed, workflow_id, trigger_name.to_string())
  }

  /// Whether this trigger lives in `subscription_id`. Subscription IDs are
  /// GUIDs, so the comparison ignores case.
  pub fn in_subscription(&self, subscription_id: &str) -> bool {
    self.subscription_id.eq_ignore_ascii_case(subscription_id)
  }

  fn for_workflow(
    parsed: &ResourceId,
    id: &str,
    trigger_name: String,
  ) -> Result<Self, ResourceIdError> {
    if parsed.resource_group.is_empty() {
      return Err(ResourceIdError::MissingResourceGroup(id.to_string()));
    }
    let workflow_name = required_segment(parsed, "workflows", id)?;

    Ok(Self {
      subscription_id: parsed.subscription_id.clone(),
      resource_group: parsed.resource_group.clone(),
      workflow_name,
      trigger_name,
    })
  }
}

impl fmt::Display for TriggerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Trigger {:?} (Logic App {:?} / Resource Group {:?})",
      self.trigger_name, self.workflow_name, self.resource_group
    )
  }
}

fn required_segment(
  parsed: &ResourceId,
  segment: &'static str,
  id: &str,
) -> Result<String, ResourceIdError> {
  parsed
    .segment(segment)
    .map(str::to_string)
    .ok_or_else(|| ResourceIdError::MissingSegment {
      segment,
      id: id.to_string(),
    })
}
