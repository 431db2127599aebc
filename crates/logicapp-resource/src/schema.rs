//! Declared configuration surface of the recurrence trigger resource.
//!
//! The schema is descriptive: enforcement lives in
//! [`RecurrenceTriggerConfig::validate`]. It is used to detect changes to
//! attributes that force a new trigger, and is printed by the CLI.

use logicapp_config::{Frequency, RecurrenceTriggerConfig, TIME_ZONES, Weekday};
use serde::Serialize;

use crate::timeouts::ResourceTimeouts;

pub const RESOURCE_TYPE: &str = "logic_app_trigger_recurrence";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
  String,
  Int,
  SetOfInt,
  SetOfString,
  /// A single nested block.
  Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
  pub name: &'static str,
  #[serde(rename = "type")]
  pub kind: AttributeType,
  pub required: bool,
  /// The service may fill the value in when it is not configured.
  pub computed: bool,
  /// Changing the value means destroying and recreating the trigger.
  pub force_new: bool,
  pub description: &'static str,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub allowed_values: Vec<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub range: Option<(u32, u32)>,
  /// Other attributes of which at least one must be set alongside this one.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub at_least_one_of: Vec<&'static str>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub attributes: Vec<Attribute>,
}

impl Attribute {
  fn new(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
    Self {
      name,
      kind,
      required: false,
      computed: false,
      force_new: false,
      description,
      allowed_values: Vec::new(),
      range: None,
      at_least_one_of: Vec::new(),
      attributes: Vec::new(),
    }
  }

  fn required(mut self) -> Self {
    self.required = true;
    self
  }

  fn computed(mut self) -> Self {
    self.computed = true;
    self
  }

  fn force_new(mut self) -> Self {
    self.force_new = true;
    self
  }

  fn allowed(mut self, values: impl IntoIterator<Item = &'static str>) -> Self {
    self.allowed_values = values.into_iter().collect();
    self
  }

  fn range(mut self, min: u32, max: u32) -> Self {
    self.range = Some((min, max));
    self
  }

  fn at_least_one_of(mut self, names: &[&'static str]) -> Self {
    self.at_least_one_of = names.to_vec();
    self
  }

  fn nested(mut self, attributes: Vec<Attribute>) -> Self {
    self.attributes = attributes;
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
  pub resource_type: &'static str,
  pub attributes: Vec<Attribute>,
  pub timeouts: ResourceTimeouts,
}

impl ResourceSchema {
  pub fn attribute(&self, name: &str) -> Option<&Attribute> {
    self.attributes.iter().find(|a| a.name == name)
  }

  /// Names of force-new attributes whose value differs between the two
  /// configurations.
  pub fn requires_replacement(
    &self,
    prior: &RecurrenceTriggerConfig,
    planned: &RecurrenceTriggerConfig,
  ) -> Result<Vec<&'static str>, serde_json::Error> {
    let prior = serde_json::to_value(prior)?;
    let planned = serde_json::to_value(planned)?;

    Ok(
      self
        .attributes
        .iter()
        .filter(|a| a.force_new && prior.get(a.name) != planned.get(a.name))
        .map(|a| a.name)
        .collect(),
    )
  }
}

/// The recurrence trigger schema.
pub fn schema() -> ResourceSchema {
  const SCHEDULE_KEYS: [&str; 3] = ["at_these_hours", "at_these_minutes", "on_these_days"];

  ResourceSchema {
    resource_type: RESOURCE_TYPE,
    attributes: vec![
      Attribute::new("name", AttributeType::String, "Name of the trigger within the workflow.")
        .required()
        .force_new(),
      Attribute::new("logic_app_id", AttributeType::String, "Resource ID of the parent workflow.")
        .required()
        .force_new(),
      Attribute::new("frequency", AttributeType::String, "Unit of time between firings.")
        .required()
        .allowed(Frequency::ALL.iter().map(Frequency::as_str)),
      Attribute::new("interval", AttributeType::Int, "Number of frequency units between firings.")
        .required(),
      Attribute::new("start_time", AttributeType::String, "RFC3339 timestamp of the first firing."),
      Attribute::new(
        "schedule",
        AttributeType::Block,
        "Hours, minutes and days the trigger fires at.",
      )
      .nested(vec![
        Attribute::new("at_these_hours", AttributeType::SetOfInt, "Hours of the day.")
          .range(0, 23)
          .at_least_one_of(&SCHEDULE_KEYS),
        Attribute::new("at_these_minutes", AttributeType::SetOfInt, "Minutes of the hour.")
          .range(0, 59)
          .at_least_one_of(&SCHEDULE_KEYS),
        Attribute::new("on_these_days", AttributeType::SetOfString, "Days of the week.")
          .allowed(Weekday::ALL.iter().map(Weekday::as_str))
          .at_least_one_of(&SCHEDULE_KEYS),
      ]),
      Attribute::new(
        "time_zone",
        AttributeType::String,
        "Time zone of start_time. Ignored unless start_time is set.",
      )
      .computed()
      .allowed(TIME_ZONES.iter().copied()),
    ],
    timeouts: ResourceTimeouts::default(),
  }
}
