// scaffold/src/serializer.rs

//! Model serializers: validation of incoming payloads against a model's field
//! table, and conversion between model instances and their flat JSON form.
//!
//! A serializer only has to name its model and its fields; every operation has
//! a default that exposes all fields verbatim.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::fields::{FieldSpec, MSG_REQUIRED};
use crate::model::Model;

/// Validated, coerced field values keyed by field name.
pub type ValidatedData = Map<String, Value>;

/// Key used for errors that belong to the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field name -> messages, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, Vec<String>>);

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn non_field(message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.add(NON_FIELD_ERRORS, message);
    errors
  }

  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    self.0.entry(field.to_string()).or_default().push(message.into());
  }

  pub fn extend_field(&mut self, field: &str, messages: Vec<String>) {
    self.0.entry(field.to_string()).or_default().extend(messages);
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      if !first {
        f.write_str("; ")?;
      }
      first = false;
      write!(f, "{}: {}", field, messages.join(" "))?;
    }
    Ok(())
  }
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(n) if n.is_f64() => "float",
    Value::Number(_) => "int",
    Value::String(_) => "str",
    Value::Array(_) => "list",
    Value::Object(_) => "dict",
  }
}

pub trait ModelSerializer: Send + Sync + 'static {
  type Model: Model;

  /// Every field of the model, in declaration order.
  fn fields() -> &'static [FieldSpec];

  /// Validates a payload. With `partial`, only supplied fields are checked and
  /// required fields may be absent.
  ///
  /// Read-only fields and unknown keys are ignored. Absent optional fields are
  /// left out of the result so the model default (on create) or the current
  /// value (on update) applies.
  fn validate(data: &Value, partial: bool) -> Result<ValidatedData, ValidationErrors> {
    let object = match data {
      Value::Object(object) => object,
      Value::Null => return Err(ValidationErrors::non_field("No data provided")),
      other => {
        return Err(ValidationErrors::non_field(format!(
          "Invalid data. Expected a dictionary, but got {}.",
          json_type_name(other)
        )))
      }
    };

    let mut validated = ValidatedData::new();
    let mut errors = ValidationErrors::new();
    for field in Self::fields().iter().filter(|f| !f.read_only) {
      match object.get(field.name) {
        Some(raw) => match field.to_internal(raw) {
          Ok(value) => {
            validated.insert(field.name.to_string(), value);
          }
          Err(messages) => errors.extend_field(field.name, messages),
        },
        None if field.required && !partial => errors.add(field.name, MSG_REQUIRED),
        None => {}
      }
    }

    if errors.is_empty() {
      Ok(validated)
    } else {
      Err(errors)
    }
  }

  /// Builds a new, unsaved instance. The primary key is left at zero for the
  /// store to assign.
  fn create(mut validated: ValidatedData) -> ScaffoldResult<Self::Model> {
    let mut row = Map::new();
    for field in Self::fields() {
      if field.name == <Self::Model as Model>::PK_FIELD {
        row.insert(field.name.to_string(), Value::from(0));
      } else if let Some(value) = validated.remove(field.name) {
        row.insert(field.name.to_string(), value);
      } else if let Some(default) = field.default {
        row.insert(field.name.to_string(), default.to_value());
      } else if field.allow_null {
        row.insert(field.name.to_string(), Value::Null);
      }
    }
    serde_json::from_value(Value::Object(row)).map_err(|source| ScaffoldError::Mapping { source })
  }

  /// Returns a copy of `instance` with the validated fields replaced.
  fn update(instance: &Self::Model, validated: ValidatedData) -> ScaffoldResult<Self::Model> {
    let mut row = match Self::to_representation(instance)? {
      Value::Object(row) => row,
      _ => Map::new(),
    };
    for (name, value) in validated {
      row.insert(name, value);
    }
    serde_json::from_value(Value::Object(row)).map_err(|source| ScaffoldError::Mapping { source })
  }

  fn to_representation(instance: &Self::Model) -> ScaffoldResult<Value> {
    serde_json::to_value(instance).map_err(|source| ScaffoldError::Mapping { source })
  }

  /// Field descriptions for `OPTIONS`, keyed by field name.
  fn metadata() -> Value {
    let described = Self::fields()
      .iter()
      .map(|field| (field.name.to_string(), field.metadata()))
      .collect::<Map<String, Value>>();
    Value::Object(described)
  }
}
