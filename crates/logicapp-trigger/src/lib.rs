//! Recurrence trigger documents for logicapp workflows.
//!
//! A workflow definition stores each trigger as a JSON object. For recurrence
//! triggers that object looks like:
//!
//! ```json
//! {
//!   "type": "Recurrence",
//!   "recurrence": {
//!     "frequency": "Week",
//!     "interval": 2,
//!     "startTime": "2020-01-01T00:00:00Z",
//!     "timeZone": "UTC",
//!     "schedule": { "weekDays": ["Monday", "Friday"] }
//!   }
//! }
//! ```
//!
//! [`expand`] turns a [`RecurrenceTriggerConfig`](logicapp_config::RecurrenceTriggerConfig)
//! into that document and [`flatten`] writes a fetched one back into configuration.

mod expand;
mod flatten;
mod number;
mod types;

pub use expand::{expand, expand_schedule};
pub use flatten::{flatten, flatten_schedule, parse_recurrence};
pub use types::{
  DocumentError, RECURRENCE_TRIGGER_TYPE, Recurrence, RecurrenceSchedule, RecurrenceTrigger,
};
