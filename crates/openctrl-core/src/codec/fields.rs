//! Loosely-typed request fields.
//!
//! A [`RawFieldSet`] is the decoded body of one request: field names mapped
//! to whatever JSON value the client sent.  It is deliberately permissive.
//! The typed accessors (`int_or`, `bool_or`, `int_sequence`) never fail;
//! a missing field, a `null`, or a value of the wrong JSON type all yield the
//! caller-supplied default.

use serde_json::Value;

use super::ValidationError;

/// A single loosely-typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Sequence(Vec<FieldValue>),
    Text(String),
    /// A nested object.  Never meaningful for any report field.
    Mapping,
}

impl FieldValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(FieldValue::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Some(FieldValue::Unsigned(u))
                } else {
                    n.as_f64().map(FieldValue::Float)
                }
            }
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(items) => Some(FieldValue::Sequence(
                // `null` entries keep their position as 0.
                items
                    .iter()
                    .map(|v| FieldValue::from_json(v).unwrap_or(FieldValue::Integer(0)))
                    .collect(),
            )),
            Value::Object(_) => Some(FieldValue::Mapping),
        }
    }

    /// Interprets the value as a signed 64-bit integer.
    ///
    /// Unsigned values above `i64::MAX` wrap; floats are truncated toward
    /// zero (saturating, NaN becomes 0).  Non-numeric values yield `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::Integer(i) => Some(i),
            FieldValue::Unsigned(u) => Some(u as i64),
            FieldValue::Float(f) => Some(f as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            FieldValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

/// The decoded fields of one request body, in the order the client sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFieldSet {
    fields: Vec<(String, FieldValue)>,
}

impl RawFieldSet {
    /// Creates an empty field set: every accessor returns its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field set from a decoded JSON body.
    ///
    /// A JSON object becomes the field set; `null` entries are dropped.
    /// A top-level `null` is treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::WrongShape`] if the top-level value is an
    /// array, string, number, or boolean.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let object = match body {
            Value::Object(object) => object,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(ValidationError::WrongShape {
                    found: json_kind(other),
                })
            }
        };

        let fields = object
            .iter()
            .filter_map(|(name, value)| {
                FieldValue::from_json(value).map(|field| (name.clone(), field))
            })
            .collect();
        Ok(Self { fields })
    }

    /// Adds (or replaces) a field.  Mostly useful for tests and benches.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reads an integer field, falling back to `default`.
    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.get(name)
            .and_then(FieldValue::as_i64)
            .unwrap_or(default)
    }

    /// Reads a boolean field, falling back to `default`.
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.get(name)
            .and_then(FieldValue::as_bool)
            .unwrap_or(default)
    }

    /// Reads a sequence of integers.
    ///
    /// A missing or non-sequence field yields an empty vector; non-numeric
    /// entries become `0` so their position is kept.
    pub fn int_sequence(&self, name: &str) -> Vec<i64> {
        match self.get(name) {
            Some(FieldValue::Sequence(items)) => {
                items.iter().map(|v| v.as_i64().unwrap_or(0)).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
