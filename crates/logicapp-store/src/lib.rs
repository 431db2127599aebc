//! Logicapp Store
//!
//! This crate provides the workflow client trait the trigger resources talk
//! to, plus two local implementations. Triggers live inside a workflow's
//! definition under `definition.triggers.{name}`.
//!
//! The [`WorkflowClient`] trait defines operations for:
//! - Creating and reading workflows
//! - Upserting, fetching and removing a trigger inside a workflow
//!
//! Changes to one workflow are serialized, so two triggers written to the same
//! workflow at once do not overwrite each other. A store serves a single
//! subscription; trigger ids from any other subscription never match a
//! workflow.

mod memory;
mod sqlite;
mod types;

pub use memory::MemoryWorkflowStore;
pub use sqlite::SqliteWorkflowStore;
pub use types::{FetchedTrigger, Workflow};

use async_trait::async_trait;
use logicapp_config::TriggerId;

fn workflow_not_found(id: &TriggerId) -> StoreError {
  StoreError::WorkflowNotFound {
    resource_group: id.resource_group.clone(),
    name: id.workflow_name.clone(),
  }
}

/// Error type for workflow client operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// The parent workflow does not exist.
  #[error("Logic App Workflow {name:?} (Resource Group {resource_group:?}) was not found")]
  WorkflowNotFound { resource_group: String, name: String },

  /// The stored definition cannot hold triggers.
  #[error("definition of Logic App Workflow {name:?} is malformed: {message}")]
  InvalidDefinition { name: String, message: String },

  /// A database error occurred.
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("failed to run migrations: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Access to workflows and the triggers inside them.
#[async_trait]
pub trait WorkflowClient: Send + Sync {
  /// The subscription every workflow of this client belongs to.
  fn subscription_id(&self) -> &str;

  /// Create an empty workflow, or return the existing one.
  async fn put_workflow(&self, resource_group: &str, name: &str) -> Result<Workflow, StoreError>;

  /// Get a workflow by resource group and name.
  async fn get_workflow(
    &self,
    resource_group: &str,
    name: &str,
  ) -> Result<Option<Workflow>, StoreError>;

  /// Create or replace a trigger. Fails if the parent workflow is missing.
  async fn upsert_trigger(
    &self,
    id: &TriggerId,
    document: serde_json::Value,
  ) -> Result<(), StoreError>;

  /// Remove a trigger. A missing workflow or trigger is not an error.
  async fn remove_trigger(&self, id: &TriggerId) -> Result<(), StoreError>;

  /// Fetch a trigger document together with its parent workflow.
  ///
  /// Returns `None` when either the workflow or the trigger does not exist.
  async fn fetch_trigger(&self, id: &TriggerId) -> Result<Option<FetchedTrigger>, StoreError> {
    if !id.in_subscription(self.subscription_id()) {
      return Ok(None);
    }

    let Some(workflow) = self
      .get_workflow(&id.resource_group, &id.workflow_name)
      .await?
    else {
      return Ok(None);
    };

    Ok(
      workflow
        .trigger(&id.trigger_name)
        .cloned()
        .map(|document| FetchedTrigger { document, workflow }),
    )
  }
}
