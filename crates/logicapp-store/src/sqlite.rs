use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use logicapp_config::TriggerId;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{StoreError, Workflow, WorkflowClient, workflow_not_found};

#[derive(FromRow)]
struct WorkflowRow {
  workflow_id: String,
  resource_group: String,
  name: String,
  definition: Json<serde_json::Value>,
  changed_at: DateTime<Utc>,
}

impl From<WorkflowRow> for Workflow {
  fn from(row: WorkflowRow) -> Self {
    Workflow {
      id: row.workflow_id,
      resource_group: row.resource_group,
      name: row.name,
      definition: row.definition.0,
      changed_at: row.changed_at,
    }
  }
}

/// SQLite-based workflow store.
///
/// Each workflow is one row holding its definition as JSON. Trigger writes
/// read, modify and write that row inside a transaction, one writer at a time.
pub struct SqliteWorkflowStore {
  pool: SqlitePool,
  subscription_id: String,
  // Deferred transactions upgrading to write locks fail with SQLITE_BUSY
  // instead of waiting, so writers queue here first.
  write_lock: Mutex<()>,
}

impl SqliteWorkflowStore {
  /// Create a new SQLite store with the given connection pool.
  pub fn new(pool: SqlitePool, subscription_id: impl Into<String>) -> Self {
    Self {
      pool,
      subscription_id: subscription_id.into(),
      write_lock: Mutex::new(()),
    }
  }

  /// Open (creating if needed) the database file at `path` and run migrations.
  pub async fn open(path: &Path, subscription_id: impl Into<String>) -> Result<Self, StoreError> {
    let options = SqliteConnectOptions::new()
      .filename(path)
      .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    let store = Self::new(pool, subscription_id);
    store.migrate().await?;
    Ok(store)
  }

  /// Run database migrations.
  pub async fn migrate(&self) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations").run(&self.pool).await?;
    Ok(())
  }

  async fn load(
    conn: &mut SqliteConnection,
    resource_group: &str,
    name: &str,
  ) -> Result<Option<Workflow>, StoreError> {
    let row: Option<WorkflowRow> = sqlx::query_as(
      r#"
            SELECT workflow_id, resource_group, name, definition, changed_at
            FROM workflows
            WHERE resource_group = ? AND name = ?
            "#,
    )
    .bind(resource_group)
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Workflow::from))
  }

  async fn save(conn: &mut SqliteConnection, workflow: &Workflow) -> Result<(), StoreError> {
    sqlx::query(
      r#"
            UPDATE workflows
            SET definition = ?, changed_at = ?
            WHERE resource_group = ? AND name = ?
            "#,
    )
    .bind(Json(&workflow.definition))
    .bind(workflow.changed_at)
    .bind(&workflow.resource_group)
    .bind(&workflow.name)
    .execute(&mut *conn)
    .await?;

    Ok(())
  }
}

#[async_trait]
impl WorkflowClient for SqliteWorkflowStore {
  fn subscription_id(&self) -> &str {
    &self.subscription_id
  }

  async fn put_workflow(&self, resource_group: &str, name: &str) -> Result<Workflow, StoreError> {
    let workflow = Workflow::new(&self.subscription_id, resource_group, name);

    let _guard = self.write_lock.lock().await;
    let mut tx = self.pool.begin().await?;
    sqlx::query(
      r#"
            INSERT OR IGNORE INTO workflows (resource_group, name, workflow_id, definition, changed_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
    )
    .bind(&workflow.resource_group)
    .bind(&workflow.name)
    .bind(&workflow.id)
    .bind(Json(&workflow.definition))
    .bind(workflow.changed_at)
    .execute(&mut *tx)
    .await?;

    let stored = Self::load(&mut tx, resource_group, name).await?;
    tx.commit().await?;

    stored.ok_or_else(|| StoreError::WorkflowNotFound {
      resource_group: resource_group.to_string(),
      name: name.to_string(),
    })
  }

  async fn get_workflow(
    &self,
    resource_group: &str,
    name: &str,
  ) -> Result<Option<Workflow>, StoreError> {
    let mut conn = self.pool.acquire().await?;
    Self::load(&mut conn, resource_group, name).await
  }

  async fn upsert_trigger(
    &self,
    id: &TriggerId,
    document: serde_json::Value,
  ) -> Result<(), StoreError> {
    if !id.in_subscription(&self.subscription_id) {
      return Err(workflow_not_found(id));
    }

    let _guard = self.write_lock.lock().await;
    let mut tx = self.pool.begin().await?;

    let mut workflow = Self::load(&mut tx, &id.resource_group, &id.workflow_name)
      .await?
      .ok_or_else(|| workflow_not_found(id))?;

    workflow.set_trigger(&id.trigger_name, document)?;
    Self::save(&mut tx, &workflow).await?;
    tx.commit().await?;

    debug!(trigger = %id.trigger_name, workflow = %id.workflow_name, "trigger written");
    Ok(())
  }

  async fn remove_trigger(&self, id: &TriggerId) -> Result<(), StoreError> {
    if !id.in_subscription(&self.subscription_id) {
      debug!(subscription = %id.subscription_id, "trigger belongs to another subscription");
      return Ok(());
    }

    let _guard = self.write_lock.lock().await;
    let mut tx = self.pool.begin().await?;

    let Some(mut workflow) = Self::load(&mut tx, &id.resource_group, &id.workflow_name).await?
    else {
      debug!(workflow = %id.workflow_name, "workflow already gone");
      return Ok(());
    };

    if workflow.remove_trigger(&id.trigger_name)?.is_some() {
      Self::save(&mut tx, &workflow).await?;
    }
    tx.commit().await?;

    Ok(())
  }
}
