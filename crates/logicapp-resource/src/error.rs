//! Resource error types.

use logicapp_config::{ResourceIdError, TriggerId, ValidationErrors};
use logicapp_store::StoreError;

/// Errors that can occur while managing a recurrence trigger.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
  /// Configuration was rejected before any remote call.
  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  /// A resource ID could not be parsed.
  #[error("parsing resource ID: {0}")]
  InvalidId(#[from] ResourceIdError),

  /// Create found a trigger that is not tracked yet.
  #[error("a resource with the ID {id:?} already exists - it needs to be imported to be managed")]
  RequiresImport { id: String },

  /// Update changed attributes that can only be set at creation.
  #[error("changing {} requires replacing the trigger", .attributes.join(", "))]
  RequiresReplacement { attributes: Vec<&'static str> },

  /// The trigger does not exist where one was expected.
  #[error("{id} was not found")]
  NotFound { id: TriggerId },

  #[error("`recurrence` was nil for {id}")]
  MissingRecurrence { id: TriggerId },

  #[error("parsing `recurrence` for {id}: {message}")]
  InvalidRecurrence { id: TriggerId, message: String },

  #[error("creating/updating {id}: {source}")]
  Upsert {
    id: TriggerId,
    #[source]
    source: StoreError,
  },

  #[error("retrieving {id}: {source}")]
  Fetch {
    id: TriggerId,
    #[source]
    source: StoreError,
  },

  #[error("removing {id}: {source}")]
  Remove {
    id: TriggerId,
    #[source]
    source: StoreError,
  },

  /// Failed to serialize the trigger document or configuration.
  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}
