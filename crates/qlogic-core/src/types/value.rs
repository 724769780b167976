//! Runtime value types for qlogic expressions
//!
//! The `Value` enum represents everything a respondent's answer or an
//! intermediate result can be. `Absent` is the single "no value" marker: a
//! cleared answer and a variable that was never recorded look the same.

use super::number;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or cleared value
    #[default]
    Absent,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 handles both integer and decimal answers)
    Number(f64),
    /// String value
    String(String),
    /// Multi-select answers
    List(Vec<Value>),
}

impl Value {
    /// Returns true for the absent marker
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Short name of the variant, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Absent, the empty string and the empty list count as empty
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Truthiness used by relevance and screenout conditions.
    ///
    /// Strings are false when empty or literally `"false"` / `"0"`. Lists are
    /// always true.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !(s.is_empty() || s == "false" || s == "0"),
            Value::List(_) => true,
        }
    }

    /// Numeric coercion. Absent and unparseable strings are NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Absent => f64::NAN,
            Value::Bool(b) => bool_to_number(*b),
            Value::Number(n) => *n,
            Value::String(s) => number::parse_strict(s),
            Value::List(items) => match items.as_slice() {
                [] => 0.0,
                [single] => number::parse_strict(&single.to_string()),
                _ => f64::NAN,
            },
        }
    }

    /// Coercive equality used by `==`, `!=`, `countif` and `sumif`.
    ///
    /// Absent only equals absent. A string compared with a number is parsed
    /// as a number, a boolean compares as 0/1, and a list compares through
    /// its joined string form.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Absent, _) | (_, Value::Absent) => false,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::List(l), Value::List(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(a, b)| a.loose_eq(b))
            }
            (Value::Bool(b), _) => Value::Number(bool_to_number(*b)).loose_eq(other),
            (_, Value::Bool(b)) => self.loose_eq(&Value::Number(bool_to_number(*b))),
            (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
                *n == number::parse_strict(s)
            }
            (Value::List(_), _) => Value::String(self.to_string()).loose_eq(other),
            (_, Value::List(_)) => self.loose_eq(&Value::String(other.to_string())),
        }
    }
}

fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Text form used for piping and string concatenation. Absent prints as
/// nothing.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&number::format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Converts a decoded JSON answer. Objects have no answer form.
impl TryFrom<serde_json::Value> for Value {
    type Error = CoreError;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Value::Absent),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| CoreError::InvalidValue(format!("unrepresentable number {}", n))),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            serde_json::Value::Object(_) => Err(CoreError::InvalidValue(
                "objects cannot be stored as answers".to_string(),
            )),
        }
    }
}
