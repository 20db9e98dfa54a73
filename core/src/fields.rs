// scaffold/src/fields.rs

//! Field descriptors for model serializers.
//!
//! A `FieldSpec` mirrors one persisted model field: its kind, whether it must be
//! supplied, whether clients may write it, and the default the model falls back
//! to. Specs are `const`-constructible so a model can declare its whole field
//! table as a `static` slice:
//!
//! ```
//! use scaffold::fields::FieldSpec;
//!
//! static FIELDS: &[FieldSpec] = &[
//!   FieldSpec::integer("id").read_only().label("ID"),
//!   FieldSpec::char("name", 255),
//!   FieldSpec::decimal("price", 10, 2),
//!   FieldSpec::integer("stock").min(0).default_int(0),
//! ];
//! assert_eq!(FIELDS.len(), 4);
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{json, Map, Number, Value};

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_INTEGER: &str = "A valid integer is required.";
pub const MSG_INVALID_NUMBER: &str = "A valid number is required.";
pub const MSG_INVALID_STRING: &str = "Not a valid string.";
pub const MSG_INVALID_BOOLEAN: &str = "Must be a valid boolean.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Integer { min: Option<i64>, max: Option<i64> },
  /// Bounded string column.
  Char { max_length: usize },
  /// Unbounded string column.
  Text,
  Decimal { max_digits: u32, decimal_places: u32 },
  Boolean,
}

/// Model-level default used when a non-required field is absent on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
  Int(i64),
  Str(&'static str),
  Bool(bool),
  /// Decimal literal, e.g. `"0.00"`.
  Decimal(&'static str),
}

impl FieldDefault {
  pub fn to_value(self) -> Value {
    match self {
      FieldDefault::Int(n) => Value::from(n),
      FieldDefault::Str(s) => Value::from(s),
      FieldDefault::Bool(b) => Value::Bool(b),
      FieldDefault::Decimal(s) => Value::from(s),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub name: &'static str,
  pub kind: FieldKind,
  pub required: bool,
  pub read_only: bool,
  pub allow_blank: bool,
  pub allow_null: bool,
  pub default: Option<FieldDefault>,
  label: Option<&'static str>,
}

impl FieldSpec {
  const fn new(name: &'static str, kind: FieldKind) -> Self {
    Self {
      name,
      kind,
      required: true,
      read_only: false,
      allow_blank: false,
      allow_null: false,
      default: None,
      label: None,
    }
  }

  pub const fn integer(name: &'static str) -> Self {
    Self::new(name, FieldKind::Integer { min: None, max: None })
  }

  pub const fn char(name: &'static str, max_length: usize) -> Self {
    Self::new(name, FieldKind::Char { max_length })
  }

  pub const fn text(name: &'static str) -> Self {
    Self::new(name, FieldKind::Text)
  }

  pub const fn decimal(name: &'static str, max_digits: u32, decimal_places: u32) -> Self {
    Self::new(
      name,
      FieldKind::Decimal {
        max_digits,
        decimal_places,
      },
    )
  }

  pub const fn boolean(name: &'static str) -> Self {
    Self::new(name, FieldKind::Boolean)
  }

  /// Server-assigned; ignored on input, always rendered on output.
  pub const fn read_only(self) -> Self {
    Self {
      read_only: true,
      required: false,
      ..self
    }
  }

  pub const fn optional(self) -> Self {
    Self { required: false, ..self }
  }

  pub const fn allow_blank(self) -> Self {
    Self {
      allow_blank: true,
      ..self
    }
  }

  pub const fn allow_null(self) -> Self {
    Self {
      allow_null: true,
      ..self
    }
  }

  pub const fn label(self, label: &'static str) -> Self {
    Self {
      label: Some(label),
      ..self
    }
  }

  /// Lower bound for integer fields. No effect on other kinds.
  pub const fn min(self, min: i64) -> Self {
    match self.kind {
      FieldKind::Integer { max, .. } => Self {
        kind: FieldKind::Integer { min: Some(min), max },
        ..self
      },
      _ => self,
    }
  }

  /// Upper bound for integer fields. No effect on other kinds.
  pub const fn max(self, max: i64) -> Self {
    match self.kind {
      FieldKind::Integer { min, .. } => Self {
        kind: FieldKind::Integer { min, max: Some(max) },
        ..self
      },
      _ => self,
    }
  }

  // A default implies the field is not required, as for model columns with defaults.
  pub const fn default_int(self, value: i64) -> Self {
    Self {
      default: Some(FieldDefault::Int(value)),
      required: false,
      ..self
    }
  }

  pub const fn default_str(self, value: &'static str) -> Self {
    Self {
      default: Some(FieldDefault::Str(value)),
      required: false,
      ..self
    }
  }

  pub const fn default_bool(self, value: bool) -> Self {
    Self {
      default: Some(FieldDefault::Bool(value)),
      required: false,
      ..self
    }
  }

  pub const fn default_decimal(self, value: &'static str) -> Self {
    Self {
      default: Some(FieldDefault::Decimal(value)),
      required: false,
      ..self
    }
  }

  /// Human label: the explicit one, else the name with its first letter
  /// capitalised and underscores turned into spaces.
  pub fn display_label(&self) -> String {
    if let Some(label) = self.label {
      return label.to_string();
    }
    let spaced = self.name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
      Some(first) => first.to_uppercase().chain(chars).collect(),
      None => String::new(),
    }
  }

  /// Coerces one incoming value into its internal form.
  ///
  /// The returned value is what gets persisted: trimmed strings, integers as
  /// JSON integers, decimals as strings rescaled to the field's decimal places.
  pub fn to_internal(&self, value: &Value) -> Result<Value, Vec<String>> {
    if value.is_null() {
      return if self.allow_null {
        Ok(Value::Null)
      } else {
        Err(vec![MSG_NULL.to_string()])
      };
    }

    match self.kind {
      FieldKind::Integer { min, max } => coerce_integer(value, min, max),
      FieldKind::Char { max_length } => self.coerce_string(value, Some(max_length)),
      FieldKind::Text => self.coerce_string(value, None),
      FieldKind::Decimal {
        max_digits,
        decimal_places,
      } => coerce_decimal(value, max_digits, decimal_places),
      FieldKind::Boolean => coerce_boolean(value),
    }
  }

  fn coerce_string(&self, value: &Value, max_length: Option<usize>) -> Result<Value, Vec<String>> {
    let raw = match value {
      Value::String(s) => s.clone(),
      Value::Number(n) => n.to_string(),
      _ => return Err(vec![MSG_INVALID_STRING.to_string()]),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() && !self.allow_blank {
      return Err(vec![MSG_BLANK.to_string()]);
    }
    if let Some(max_length) = max_length {
      if trimmed.chars().count() > max_length {
        return Err(vec![format!(
          "Ensure this field has no more than {} characters.",
          max_length
        )]);
      }
    }
    Ok(Value::String(trimmed.to_string()))
  }

  /// Describes the field for `OPTIONS` responses.
  pub fn metadata(&self) -> Value {
    let type_name = match self.kind {
      FieldKind::Integer { .. } => "integer",
      FieldKind::Char { .. } | FieldKind::Text => "string",
      FieldKind::Decimal { .. } => "decimal",
      FieldKind::Boolean => "boolean",
    };

    let mut meta = Map::new();
    meta.insert("type".into(), json!(type_name));
    meta.insert("required".into(), json!(self.required));
    meta.insert("read_only".into(), json!(self.read_only));
    meta.insert("label".into(), json!(self.display_label()));
    match self.kind {
      FieldKind::Integer { min, max } => {
        if let Some(min) = min {
          meta.insert("min_value".into(), json!(min));
        }
        if let Some(max) = max {
          meta.insert("max_value".into(), json!(max));
        }
      }
      FieldKind::Char { max_length } => {
        meta.insert("max_length".into(), json!(max_length));
      }
      FieldKind::Decimal {
        max_digits,
        decimal_places,
      } => {
        meta.insert("max_digits".into(), json!(max_digits));
        meta.insert("decimal_places".into(), json!(decimal_places));
      }
      FieldKind::Text | FieldKind::Boolean => {}
    }
    Value::Object(meta)
  }
}

fn coerce_integer(value: &Value, min: Option<i64>, max: Option<i64>) -> Result<Value, Vec<String>> {
  let parsed = match value {
    Value::Number(n) => number_as_integer(n),
    Value::String(s) => parse_integer_str(s.trim()),
    _ => None,
  };
  let n = parsed.ok_or_else(|| vec![MSG_INVALID_INTEGER.to_string()])?;

  let mut errors = Vec::new();
  if let Some(min) = min {
    if n < min {
      errors.push(format!("Ensure this value is greater than or equal to {}.", min));
    }
  }
  if let Some(max) = max {
    if n > max {
      errors.push(format!("Ensure this value is less than or equal to {}.", max));
    }
  }
  if errors.is_empty() {
    Ok(Value::from(n))
  } else {
    Err(errors)
  }
}

fn number_as_integer(n: &Number) -> Option<i64> {
  if let Some(i) = n.as_i64() {
    return Some(i);
  }
  // 3.0 is an integer, 3.5 is not.
  let f = n.as_f64()?;
  if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
    Some(f as i64)
  } else {
    None
  }
}

fn parse_integer_str(s: &str) -> Option<i64> {
  // "12", "12." and "12.000" are all accepted.
  let digits = match s.find('.') {
    Some(dot) if s[dot + 1..].chars().all(|c| c == '0') => &s[..dot],
    Some(_) => return None,
    None => s,
  };
  digits.parse::<i64>().ok()
}

fn coerce_decimal(value: &Value, max_digits: u32, decimal_places: u32) -> Result<Value, Vec<String>> {
  let raw = match value {
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.trim().to_string(),
    _ => return Err(vec![MSG_INVALID_NUMBER.to_string()]),
  };
  let parsed = match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
    Ok(parsed) => parsed,
    // A well-formed numeral too long for `Decimal` is over any column's digit limit.
    Err(_) if is_plain_numeral(&raw) => return Err(vec![max_digits_message(max_digits)]),
    Err(_) => return Err(vec![MSG_INVALID_NUMBER.to_string()]),
  };

  // Digit accounting follows the literal as written: "9.990" has three places.
  let scale = parsed.scale();
  let digits = parsed.mantissa().unsigned_abs().to_string().len() as u32;
  let (total, places) = if scale == 0 {
    (digits, 0)
  } else {
    (digits.max(scale), scale)
  };
  let whole = total - places;

  if total > max_digits {
    return Err(vec![max_digits_message(max_digits)]);
  }
  if places > decimal_places {
    return Err(vec![format!(
      "Ensure that there are no more than {} decimal places.",
      decimal_places
    )]);
  }
  if whole > max_digits.saturating_sub(decimal_places) {
    return Err(vec![format!(
      "Ensure that there are no more than {} digits before the decimal point.",
      max_digits.saturating_sub(decimal_places)
    )]);
  }

  let mut quantized = parsed;
  quantized.rescale(decimal_places);
  Ok(Value::String(quantized.to_string()))
}

fn max_digits_message(max_digits: u32) -> String {
  format!("Ensure that there are no more than {} digits in total.", max_digits)
}

/// `[-+]?digits[.digits]`
fn is_plain_numeral(s: &str) -> bool {
  let unsigned = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
  let (whole, fraction) = match unsigned.split_once('.') {
    Some((whole, fraction)) => (whole, Some(fraction)),
    None => (unsigned, None),
  };
  let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
  all_digits(whole) && fraction.map_or(true, all_digits)
}

fn coerce_boolean(value: &Value) -> Result<Value, Vec<String>> {
  let parsed = match value {
    Value::Bool(b) => Some(*b),
    Value::Number(n) => match n.as_i64() {
      Some(1) => Some(true),
      Some(0) => Some(false),
      _ => None,
    },
    Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
      "t" | "y" | "yes" | "true" | "on" | "1" => Some(true),
      "f" | "n" | "no" | "false" | "off" | "0" => Some(false),
      _ => None,
    },
    _ => None,
  };
  parsed
    .map(Value::Bool)
    .ok_or_else(|| vec![MSG_INVALID_BOOLEAN.to_string()])
}
