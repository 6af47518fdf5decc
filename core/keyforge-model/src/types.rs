use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The declared type of a key field.
///
/// This is a closed set: every operation that depends on a field's type
/// dispatches on this enum instead of looking anything up at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Bool,
    Int32,
    Int64,
    Float64,
    String,
    Uuid,
    DateTime,
    Bytes,
}

/// Whether a type behaves like an inline value or a nullable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// Always holds a value; defaults to its zero.
    Value,
    /// May hold `Null`; defaults to `Null`.
    Reference,
}

impl TypeTag {
    pub const fn category(self) -> TypeCategory {
        match self {
            TypeTag::String | TypeTag::Bytes => TypeCategory::Reference,
            TypeTag::Bool
            | TypeTag::Int32
            | TypeTag::Int64
            | TypeTag::Float64
            | TypeTag::Uuid
            | TypeTag::DateTime => TypeCategory::Value,
        }
    }

    /// Returns `true` if a slot of this type accepts `Null`.
    pub const fn is_nullable(self) -> bool {
        matches!(self.category(), TypeCategory::Reference)
    }

    /// The value a freshly default-initialized slot of this type holds.
    pub fn default_value(self) -> Value {
        match self {
            TypeTag::Bool => Value::Bool(false),
            TypeTag::Int32 => Value::Int32(0),
            TypeTag::Int64 => Value::Int64(0),
            TypeTag::Float64 => Value::Float64(0.0),
            TypeTag::Uuid => Value::Uuid(Uuid::nil()),
            TypeTag::DateTime => Value::DateTime(DateTime::<Utc>::UNIX_EPOCH),
            TypeTag::String | TypeTag::Bytes => Value::Null,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TypeTag::Bool => "bool",
            TypeTag::Int32 => "int32",
            TypeTag::Int64 => "int64",
            TypeTag::Float64 => "float64",
            TypeTag::String => "string",
            TypeTag::Uuid => "uuid",
            TypeTag::DateTime => "date_time",
            TypeTag::Bytes => "bytes",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest integer magnitude an `f64` represents exactly (2^53).
const MAX_EXACT_F64_INT: u64 = 1 << 53;

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Bytes(Vec<u8>),
}

impl Value {
    /// The tag of this value, or `None` for `Null`.
    pub fn tag(&self) -> Option<TypeTag> {
        let tag = match self {
            Value::Null => return None,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int32(_) => TypeTag::Int32,
            Value::Int64(_) => TypeTag::Int64,
            Value::Float64(_) => TypeTag::Float64,
            Value::String(_) => TypeTag::String,
            Value::Uuid(_) => TypeTag::Uuid,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::Bytes(_) => TypeTag::Bytes,
        };
        Some(tag)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts this value into one of type `tag` without losing information.
    ///
    /// Returns `None` if the value is not comparable to `tag`. Narrowing
    /// integer conversions succeed only when the value is in range.
    pub fn coerce_to(&self, tag: TypeTag) -> Option<Value> {
        if self.tag() == Some(tag) {
            return Some(self.clone());
        }
        match (self, tag) {
            (Value::Null, t) if t.is_nullable() => Some(Value::Null),
            (Value::Int32(n), TypeTag::Int64) => Some(Value::Int64(i64::from(*n))),
            (Value::Int64(n), TypeTag::Int32) => i32::try_from(*n).ok().map(Value::Int32),
            (Value::Int32(n), TypeTag::Float64) => Some(Value::Float64(f64::from(*n))),
            (Value::Int64(n), TypeTag::Float64) if n.unsigned_abs() <= MAX_EXACT_F64_INT => {
                Some(Value::Float64(*n as f64))
            }
            (Value::String(s), TypeTag::Uuid) => Uuid::parse_str(s).ok().map(Value::Uuid),
            (Value::String(s), TypeTag::DateTime) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| Value::DateTime(dt.with_timezone(&Utc))),
            _ => None,
        }
    }

    /// Reads a JSON value. Integers that fit in 32 bits become `Int32`.
    ///
    /// Objects and non-byte arrays have no `Value` counterpart and yield `None`.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(match i32::try_from(i) {
                        Ok(small) => Value::Int32(small),
                        Err(_) => Value::Int64(i),
                    })
                } else {
                    n.as_f64().map(Value::Float64)
                }
            }
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(Value::Bytes),
            serde_json::Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int32(n) => serde_json::Value::from(*n),
            Value::Int64(n) => serde_json::Value::from(*n),
            Value::Float64(n) => serde_json::Value::from(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Uuid(u) => serde_json::Value::String(u.to_string()),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::Bytes(bytes) => serde_json::Value::from(bytes.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int32(n) => write!(f, "{n}"),
            Value::Int64(n) => write!(f, "{n}"),
            Value::Float64(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}
