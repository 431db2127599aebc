use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::StoreError;

/// A workflow and its definition document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
  pub id: String,
  pub resource_group: String,
  pub name: String,
  pub definition: Value,
  pub changed_at: DateTime<Utc>,
}

impl Workflow {
  /// An empty workflow with no triggers or actions.
  pub fn new(subscription_id: &str, resource_group: &str, name: &str) -> Self {
    Self {
      id: Self::resource_id(subscription_id, resource_group, name),
      resource_group: resource_group.to_string(),
      name: name.to_string(),
      definition: json!({"triggers": {}, "actions": {}}),
      changed_at: Utc::now(),
    }
  }

  pub fn resource_id(subscription_id: &str, resource_group: &str, name: &str) -> String {
    format!(
      "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Logic/workflows/{name}"
    )
  }

  /// The trigger document stored under `name`, if any.
  pub fn trigger(&self, name: &str) -> Option<&Value> {
    self.definition.get("triggers")?.get(name)
  }

  pub(crate) fn set_trigger(&mut self, name: &str, document: Value) -> Result<(), StoreError> {
    self.triggers_mut()?.insert(name.to_string(), document);
    self.changed_at = Utc::now();
    Ok(())
  }

  pub(crate) fn remove_trigger(&mut self, name: &str) -> Result<Option<Value>, StoreError> {
    let removed = self.triggers_mut()?.remove(name);
    if removed.is_some() {
      self.changed_at = Utc::now();
    }
    Ok(removed)
  }

  fn triggers_mut(&mut self) -> Result<&mut Map<String, Value>, StoreError> {
    let name = self.name.clone();
    let definition = self
      .definition
      .as_object_mut()
      .ok_or_else(|| StoreError::InvalidDefinition {
        name: name.clone(),
        message: "definition is not an object".to_string(),
      })?;

    definition
      .entry("triggers")
      .or_insert_with(|| Value::Object(Map::new()))
      .as_object_mut()
      .ok_or_else(|| StoreError::InvalidDefinition {
        name,
        message: "`triggers` is not an object".to_string(),
      })
  }
}

/// A trigger document and the workflow it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTrigger {
  pub document: Value,
  pub workflow: Workflow,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_workflow_id() {
    let workflow = Workflow::new("sub", "rg", "wf");
    assert_eq!(
      workflow.id,
      "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Logic/workflows/wf"
    );
    assert_eq!(workflow.definition["triggers"], json!({}));
  }

  #[test]
  fn test_set_and_remove_trigger() {
    let mut workflow = Workflow::new("sub", "rg", "wf");
    workflow
      .set_trigger("t", json!({"type": "Recurrence"}))
      .unwrap();
    assert_eq!(workflow.trigger("t"), Some(&json!({"type": "Recurrence"})));

    let removed = workflow.remove_trigger("t").unwrap();
    assert!(removed.is_some());
    assert_eq!(workflow.trigger("t"), None);
    assert_eq!(workflow.remove_trigger("t").unwrap(), None);
  }

  #[test]
  fn test_set_trigger_creates_missing_triggers_map() {
    let mut workflow = Workflow::new("sub", "rg", "wf");
    workflow.definition = json!({"actions": {}});
    workflow.set_trigger("t", json!({})).unwrap();
    assert!(workflow.trigger("t").is_some());
  }

  #[test]
  fn test_malformed_definition() {
    let mut workflow = Workflow::new("sub", "rg", "wf");
    workflow.definition = json!({"triggers": []});
    let err = workflow.set_trigger("t", json!({})).unwrap_err();
    assert!(matches!(err, StoreError::InvalidDefinition { .. }));
  }
}
