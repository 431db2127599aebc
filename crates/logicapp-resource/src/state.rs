use logicapp_config::RecurrenceTriggerConfig;
use serde::{Deserialize, Serialize};

/// What is tracked for a trigger that exists remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
  /// Trigger resource ID (`{logic_app_id}/triggers/{name}`).
  pub id: String,

  pub config: RecurrenceTriggerConfig,
}

/// Resource ID of trigger `name` on the workflow `logic_app_id`.
pub fn trigger_resource_id(logic_app_id: &str, name: &str) -> String {
  format!("{}/triggers/{}", logic_app_id.trim_end_matches('/'), name)
}
