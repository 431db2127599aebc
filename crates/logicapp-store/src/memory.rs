use std::collections::HashMap;

use async_trait::async_trait;
use logicapp_config::TriggerId;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{StoreError, Workflow, WorkflowClient, workflow_not_found};

type WorkflowKey = (String, String);

/// In-memory workflow store.
///
/// All workflows sit behind one mutex, which also serializes trigger writes.
pub struct MemoryWorkflowStore {
  subscription_id: String,
  workflows: Mutex<HashMap<WorkflowKey, Workflow>>,
}

impl MemoryWorkflowStore {
  pub fn new(subscription_id: impl Into<String>) -> Self {
    Self {
      subscription_id: subscription_id.into(),
      workflows: Mutex::new(HashMap::new()),
    }
  }

  fn key(resource_group: &str, name: &str) -> WorkflowKey {
    (resource_group.to_string(), name.to_string())
  }
}

#[async_trait]
impl WorkflowClient for MemoryWorkflowStore {
  fn subscription_id(&self) -> &str {
    &self.subscription_id
  }

  async fn put_workflow(&self, resource_group: &str, name: &str) -> Result<Workflow, StoreError> {
    let mut workflows = self.workflows.lock().await;
    let workflow = workflows
      .entry(Self::key(resource_group, name))
      .or_insert_with(|| Workflow::new(&self.subscription_id, resource_group, name));
    Ok(workflow.clone())
  }

  async fn get_workflow(
    &self,
    resource_group: &str,
    name: &str,
  ) -> Result<Option<Workflow>, StoreError> {
    let workflows = self.workflows.lock().await;
    Ok(workflows.get(&Self::key(resource_group, name)).cloned())
  }

  async fn upsert_trigger(
    &self,
    id: &TriggerId,
    document: serde_json::Value,
  ) -> Result<(), StoreError> {
    if !id.in_subscription(&self.subscription_id) {
      return Err(workflow_not_found(id));
    }

    let mut workflows = self.workflows.lock().await;
    let workflow = workflows
      .get_mut(&Self::key(&id.resource_group, &id.workflow_name))
      .ok_or_else(|| workflow_not_found(id))?;

    workflow.set_trigger(&id.trigger_name, document)?;
    debug!(trigger = %id.trigger_name, workflow = %id.workflow_name, "trigger written");
    Ok(())
  }

  async fn remove_trigger(&self, id: &TriggerId) -> Result<(), StoreError> {
    if !id.in_subscription(&self.subscription_id) {
      debug!(subscription = %id.subscription_id, "trigger belongs to another subscription");
      return Ok(());
    }

    let mut workflows = self.workflows.lock().await;
    let Some(workflow) = workflows.get_mut(&Self::key(&id.resource_group, &id.workflow_name))
    else {
      debug!(workflow = %id.workflow_name, "workflow already gone");
      return Ok(());
    };

    workflow.remove_trigger(&id.trigger_name)?;
    Ok(())
  }
}
