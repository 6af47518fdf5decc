use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Read access to the named properties of an owner instance.
///
/// Key selectors read key field values through this trait, so any owner
/// representation (JSON document, typed map, another record) can supply them.
pub trait PropertySource {
    /// Returns the current value of `name`, or `None` if the instance has no
    /// such property.
    fn property(&self, name: &str) -> Option<Value>;
}

/// A generic entity instance whose properties live in a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: String,
    pub data: serde_json::Value,
}

impl Entity {
    pub fn new(entity_type: &str, data: serde_json::Value) -> Self {
        Self {
            entity_type: entity_type.into(),
            data,
        }
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract an integer value from `data` using a JSON pointer.
    pub fn get_i64(&self, pointer: &str) -> Option<i64> {
        self.data.pointer(pointer).and_then(|v| v.as_i64())
    }
}

impl PropertySource for Entity {
    fn property(&self, name: &str) -> Option<Value> {
        self.data.get(name).and_then(Value::from_json)
    }
}

impl PropertySource for BTreeMap<String, Value> {
    fn property(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl PropertySource for HashMap<String, Value> {
    fn property(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}
