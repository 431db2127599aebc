//! Recurrence trigger create/read/update/delete.

use logicapp_config::{RecurrenceTriggerConfig, TriggerId};
use logicapp_store::WorkflowClient;
use logicapp_trigger::{DocumentError, expand, flatten, parse_recurrence};
use tracing::{debug, error, info, instrument};

use crate::error::ResourceError;
use crate::schema::schema;
use crate::state::{ResourceState, trigger_resource_id};
use crate::timeouts::ResourceTimeouts;

/// Manages recurrence triggers through a [`WorkflowClient`].
///
/// Holds no state of its own between calls; every operation validates,
/// talks to the client and returns the new tracked state.
pub struct RecurrenceTriggerResource<C> {
  client: C,
  timeouts: ResourceTimeouts,
}

impl<C: WorkflowClient> RecurrenceTriggerResource<C> {
  pub fn new(client: C) -> Self {
    Self {
      client,
      timeouts: ResourceTimeouts::default(),
    }
  }

  pub fn with_timeouts(mut self, timeouts: ResourceTimeouts) -> Self {
    self.timeouts = timeouts;
    self
  }

  /// Timeouts the host should enforce around each operation.
  pub fn timeouts(&self) -> ResourceTimeouts {
    self.timeouts
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  /// Create a trigger that is not tracked yet.
  ///
  /// Fails with [`ResourceError::RequiresImport`] if the workflow already has
  /// a trigger with this name.
  #[instrument(
    name = "recurrence_trigger_create",
    skip(self, config),
    fields(trigger = %config.name, logic_app_id = %config.logic_app_id)
  )]
  pub async fn create(
    &self,
    config: &RecurrenceTriggerConfig,
  ) -> Result<ResourceState, ResourceError> {
    logged(self.create_inner(config).await, "created")
  }

  async fn create_inner(
    &self,
    config: &RecurrenceTriggerConfig,
  ) -> Result<ResourceState, ResourceError> {
    config.validate()?;
    let id = TriggerId::from_workflow_id(&config.logic_app_id, &config.name)?;

    let existing = self
      .client
      .fetch_trigger(&id)
      .await
      .map_err(|source| ResourceError::Fetch {
        id: id.clone(),
        source,
      })?;
    if existing.is_some() {
      return Err(ResourceError::RequiresImport {
        id: trigger_resource_id(&config.logic_app_id, &config.name),
      });
    }

    self.write(&id, config).await?;
    self.refresh(&id, config).await
  }

  /// Update a tracked trigger in place.
  ///
  /// Fails with [`ResourceError::RequiresReplacement`] if `name` or
  /// `logic_app_id` changed.
  #[instrument(
    name = "recurrence_trigger_update",
    skip(self, prior, config),
    fields(id = %prior.id)
  )]
  pub async fn update(
    &self,
    prior: &ResourceState,
    config: &RecurrenceTriggerConfig,
  ) -> Result<ResourceState, ResourceError> {
    logged(self.update_inner(prior, config).await, "updated")
  }

  async fn update_inner(
    &self,
    prior: &ResourceState,
    config: &RecurrenceTriggerConfig,
  ) -> Result<ResourceState, ResourceError> {
    config.validate()?;

    let attributes = schema().requires_replacement(&prior.config, config)?;
    if !attributes.is_empty() {
      return Err(ResourceError::RequiresReplacement { attributes });
    }

    let id = TriggerId::parse(&prior.id)?;
    self.write(&id, config).await?;
    self.refresh(&id, config).await
  }

  /// Read the trigger identified by `id`.
  ///
  /// Returns `Ok(None)` when the trigger (or its workflow) no longer exists,
  /// meaning it should be dropped from state. Fields the service does not
  /// return keep their value from `prior`.
  #[instrument(name = "recurrence_trigger_read", skip(self, prior))]
  pub async fn read(
    &self,
    id: &str,
    prior: Option<&RecurrenceTriggerConfig>,
  ) -> Result<Option<ResourceState>, ResourceError> {
    let trigger_id = TriggerId::parse(id)?;

    let fetched = self
      .client
      .fetch_trigger(&trigger_id)
      .await
      .map_err(|source| ResourceError::Fetch {
        id: trigger_id.clone(),
        source,
      })?;

    let Some(fetched) = fetched else {
      debug!(
        "Logic App {:?} (Resource Group {:?}) does not contain Trigger {:?} - removing from state",
        trigger_id.workflow_name, trigger_id.resource_group, trigger_id.trigger_name
      );
      return Ok(None);
    };

    let recurrence = parse_recurrence(&fetched.document).map_err(|e| match e {
      DocumentError::MissingRecurrence => ResourceError::MissingRecurrence {
        id: trigger_id.clone(),
      },
      DocumentError::InvalidRecurrence { message } => ResourceError::InvalidRecurrence {
        id: trigger_id.clone(),
        message,
      },
    })?;

    let mut config = match prior {
      Some(prior) => prior.clone(),
      None => RecurrenceTriggerConfig::new(
        trigger_id.trigger_name.clone(),
        fetched.workflow.id.clone(),
        recurrence.frequency,
        recurrence.interval,
      ),
    };
    config.name = trigger_id.trigger_name;
    // Resource ids compare case-insensitively; keep the caller's spelling.
    if !config.logic_app_id.eq_ignore_ascii_case(&fetched.workflow.id) {
      config.logic_app_id = fetched.workflow.id;
    }
    flatten(&recurrence, &mut config);

    Ok(Some(ResourceState {
      id: id.to_string(),
      config,
    }))
  }

  /// Start tracking an existing trigger.
  #[instrument(name = "recurrence_trigger_import", skip(self))]
  pub async fn import(&self, id: &str) -> Result<ResourceState, ResourceError> {
    let state = self.read(id, None).await?;
    let state = match state {
      Some(state) => Ok(state),
      None => Err(ResourceError::NotFound {
        id: TriggerId::parse(id)?,
      }),
    };
    logged(state, "imported")
  }

  /// Remove the trigger from its workflow.
  #[instrument(name = "recurrence_trigger_delete", skip(self))]
  pub async fn delete(&self, id: &str) -> Result<(), ResourceError> {
    logged(self.delete_inner(id).await, "deleted")
  }

  async fn delete_inner(&self, id: &str) -> Result<(), ResourceError> {
    let trigger_id = TriggerId::parse(id)?;

    self
      .client
      .remove_trigger(&trigger_id)
      .await
      .map_err(|source| ResourceError::Remove {
        id: trigger_id,
        source,
      })
  }

  async fn write(
    &self,
    id: &TriggerId,
    config: &RecurrenceTriggerConfig,
  ) -> Result<(), ResourceError> {
    let document = expand(config).to_value()?;

    self
      .client
      .upsert_trigger(id, document)
      .await
      .map_err(|source| ResourceError::Upsert {
        id: id.clone(),
        source,
      })
  }

  /// Re-read after a write so state reflects what the service stored.
  async fn refresh(
    &self,
    id: &TriggerId,
    config: &RecurrenceTriggerConfig,
  ) -> Result<ResourceState, ResourceError> {
    let state_id = trigger_resource_id(&config.logic_app_id, &config.name);

    self
      .read(&state_id, Some(config))
      .await?
      .ok_or_else(|| ResourceError::NotFound { id: id.clone() })
  }
}

fn logged<T>(result: Result<T, ResourceError>, action: &str) -> Result<T, ResourceError> {
  match &result {
    Ok(_) => info!("trigger {action}"),
    Err(e) => error!(error = %e, "trigger not {action}"),
  }
  result
}
