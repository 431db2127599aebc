//! Behaviour shared by every workflow client implementation.

use std::sync::Arc;

use logicapp_config::TriggerId;
use logicapp_store::{MemoryWorkflowStore, SqliteWorkflowStore, StoreError, WorkflowClient};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;

const SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";
const OTHER_SUBSCRIPTION: &str = "11111111-1111-1111-1111-111111111111";

async fn sqlite_store() -> SqliteWorkflowStore {
  // A single connection keeps every query on the same in-memory database.
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("failed to open in-memory database");

  let store = SqliteWorkflowStore::new(pool, SUBSCRIPTION);
  store.migrate().await.expect("failed to run migrations");
  store
}

async fn put_workflow_is_idempotent(client: &dyn WorkflowClient) {
  let first = client.put_workflow("rg", "wf").await.unwrap();
  assert_eq!(
    first.id,
    format!("/subscriptions/{SUBSCRIPTION}/resourceGroups/rg/providers/Microsoft.Logic/workflows/wf")
  );

  let id = TriggerId::new(SUBSCRIPTION, "rg", "wf", "t");
  client.upsert_trigger(&id, json!({"type": "Recurrence"})).await.unwrap();

  let second = client.put_workflow("rg", "wf").await.unwrap();
  assert_eq!(second.trigger("t"), Some(&json!({"type": "Recurrence"})));
}

async fn trigger_lifecycle(client: &dyn WorkflowClient) {
  client.put_workflow("rg", "wf").await.unwrap();
  let id = TriggerId::new(SUBSCRIPTION, "rg", "wf", "daily");

  assert!(client.fetch_trigger(&id).await.unwrap().is_none());

  let document = json!({"type": "Recurrence", "recurrence": {"frequency": "Day", "interval": 1}});
  client.upsert_trigger(&id, document.clone()).await.unwrap();

  let fetched = client.fetch_trigger(&id).await.unwrap().expect("trigger should exist");
  assert_eq!(fetched.document, document);
  assert_eq!(fetched.workflow.name, "wf");
  assert_eq!(fetched.workflow.resource_group, "rg");

  let replacement = json!({"type": "Recurrence", "recurrence": {"frequency": "Hour", "interval": 2}});
  client.upsert_trigger(&id, replacement.clone()).await.unwrap();
  let fetched = client.fetch_trigger(&id).await.unwrap().unwrap();
  assert_eq!(fetched.document, replacement);

  client.remove_trigger(&id).await.unwrap();
  assert!(client.fetch_trigger(&id).await.unwrap().is_none());

  // Removing again is fine.
  client.remove_trigger(&id).await.unwrap();
}

async fn triggers_do_not_clobber_each_other(client: &dyn WorkflowClient) {
  client.put_workflow("rg", "wf").await.unwrap();
  let first = TriggerId::new(SUBSCRIPTION, "rg", "wf", "first");
  let second = TriggerId::new(SUBSCRIPTION, "rg", "wf", "second");

  client.upsert_trigger(&first, json!({"n": 1})).await.unwrap();
  client.upsert_trigger(&second, json!({"n": 2})).await.unwrap();
  client.remove_trigger(&first).await.unwrap();

  assert!(client.fetch_trigger(&first).await.unwrap().is_none());
  assert_eq!(
    client.fetch_trigger(&second).await.unwrap().unwrap().document,
    json!({"n": 2})
  );
}

async fn missing_workflow(client: &dyn WorkflowClient) {
  let id = TriggerId::new(SUBSCRIPTION, "rg", "nope", "t");

  assert!(client.get_workflow("rg", "nope").await.unwrap().is_none());
  assert!(client.fetch_trigger(&id).await.unwrap().is_none());
  client.remove_trigger(&id).await.unwrap();

  let err = client.upsert_trigger(&id, json!({})).await.unwrap_err();
  assert!(matches!(
    err,
    StoreError::WorkflowNotFound { ref resource_group, ref name } if resource_group == "rg" && name == "nope"
  ));
}

async fn other_subscription_is_not_found(client: &dyn WorkflowClient) {
  client.put_workflow("rg", "wf").await.unwrap();
  let ours = TriggerId::new(SUBSCRIPTION, "rg", "wf", "t");
  let theirs = TriggerId::new(OTHER_SUBSCRIPTION, "rg", "wf", "t");

  let err = client.upsert_trigger(&theirs, json!({"n": 1})).await.unwrap_err();
  assert!(matches!(err, StoreError::WorkflowNotFound { .. }));
  assert!(client.fetch_trigger(&ours).await.unwrap().is_none());

  client.upsert_trigger(&ours, json!({"n": 2})).await.unwrap();
  assert!(client.fetch_trigger(&theirs).await.unwrap().is_none());

  // Removal through the other subscription leaves our trigger alone.
  client.remove_trigger(&theirs).await.unwrap();
  assert_eq!(
    client.fetch_trigger(&ours).await.unwrap().unwrap().document,
    json!({"n": 2})
  );
}

async fn concurrent_upserts_all_land(client: Arc<dyn WorkflowClient>) {
  client.put_workflow("rg", "wf").await.unwrap();

  let handles: Vec<_> = (0..16)
    .map(|n| {
      let client = Arc::clone(&client);
      tokio::spawn(async move {
        let id = TriggerId::new(SUBSCRIPTION, "rg", "wf", format!("t{n}"));
        client.upsert_trigger(&id, json!({"n": n})).await
      })
    })
    .collect();

  for handle in handles {
    handle.await.unwrap().unwrap();
  }

  let workflow = client.get_workflow("rg", "wf").await.unwrap().unwrap();
  for n in 0..16 {
    assert_eq!(workflow.trigger(&format!("t{n}")), Some(&json!({"n": n})));
  }
}

#[tokio::test]
async fn test_memory_put_workflow_is_idempotent() {
  put_workflow_is_idempotent(&MemoryWorkflowStore::new(SUBSCRIPTION)).await;
}

#[tokio::test]
async fn test_sqlite_put_workflow_is_idempotent() {
  put_workflow_is_idempotent(&sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_trigger_lifecycle() {
  trigger_lifecycle(&MemoryWorkflowStore::new(SUBSCRIPTION)).await;
}

#[tokio::test]
async fn test_sqlite_trigger_lifecycle() {
  trigger_lifecycle(&sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_triggers_do_not_clobber_each_other() {
  triggers_do_not_clobber_each_other(&MemoryWorkflowStore::new(SUBSCRIPTION)).await;
}

#[tokio::test]
async fn test_sqlite_triggers_do_not_clobber_each_other() {
  triggers_do_not_clobber_each_other(&sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_missing_workflow() {
  missing_workflow(&MemoryWorkflowStore::new(SUBSCRIPTION)).await;
}

#[tokio::test]
async fn test_sqlite_missing_workflow() {
  missing_workflow(&sqlite_store().await).await;
}

#[tokio::test]
async fn test_sqlite_open_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("logicapp.db");

  {
    let store = SqliteWorkflowStore::open(&path, SUBSCRIPTION).await.unwrap();
    store.put_workflow("rg", "wf").await.unwrap();
    store
      .upsert_trigger(&TriggerId::new(SUBSCRIPTION, "rg", "wf", "t"), json!({"kept": true}))
      .await
      .unwrap();
  }

  let reopened = SqliteWorkflowStore::open(&path, SUBSCRIPTION).await.unwrap();
  let fetched = reopened
    .fetch_trigger(&TriggerId::new(SUBSCRIPTION, "rg", "wf", "t"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.document, json!({"kept": true}));
}

#[tokio::test]
async fn test_memory_other_subscription_is_not_found() {
  other_subscription_is_not_found(&MemoryWorkflowStore::new(SUBSCRIPTION)).await;
}

#[tokio::test]
async fn test_sqlite_other_subscription_is_not_found() {
  other_subscription_is_not_found(&sqlite_store().await).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_memory_concurrent_upserts() {
  concurrent_upserts_all_land(Arc::new(MemoryWorkflowStore::new(SUBSCRIPTION))).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_sqlite_concurrent_upserts() {
  // A file-backed pool hands out several connections, unlike the in-memory one.
  let dir = tempfile::tempdir().unwrap();
  let store = SqliteWorkflowStore::open(&dir.path().join("logicapp.db"), SUBSCRIPTION)
    .await
    .unwrap();

  concurrent_upserts_all_land(Arc::new(store)).await;
}
