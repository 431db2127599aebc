//! Logicapp Resource
//!
//! This crate provides the recurrence trigger resource: its schema, its
//! operation timeouts, and the create/read/update/delete orchestration that
//! validates configuration, expands it into a trigger document and hands it
//! to a [`WorkflowClient`](logicapp_store::WorkflowClient).
//!
//! ```text
//!   Absent ──create──▶ Present ──update──▶ Present
//!     ▲                   │
//!     └──delete / read ───┘   (read drops a trigger deleted out of band)
//! ```

mod error;
mod resource;
mod schema;
mod state;
mod timeouts;

pub use error::ResourceError;
pub use resource::RecurrenceTriggerResource;
pub use schema::{Attribute, AttributeType, RESOURCE_TYPE, ResourceSchema, schema};
pub use state::{ResourceState, trigger_resource_id};
pub use timeouts::ResourceTimeouts;
