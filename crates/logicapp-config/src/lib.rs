//! Logicapp Config
//!
//! This crate contains the declarative configuration types for a Logic App
//! recurrence trigger. These types represent what the user asked for, before
//! they are expanded into the workflow trigger document sent to the remote API.
//!
//! Configuration can be loaded from:
//! - JSON files (via CLI with `trigger apply --config=trigger.json`)
//! - Persisted resource state (as JSON blobs)
//!
//! Every field is validated with [`RecurrenceTriggerConfig::validate`] before
//! any remote call is made.

mod enums;
mod resource_id;
mod schedule;
mod time_zone;
mod trigger;
mod validate;

pub use enums::{Frequency, ParseEnumError, Weekday};
pub use resource_id::{ResourceId, ResourceIdError, TriggerId};
pub use schedule::Schedule;
pub use time_zone::{TIME_ZONES, is_valid_time_zone};
pub use trigger::RecurrenceTriggerConfig;
pub use validate::{ValidationError, ValidationErrors};
