use keyforge_model::TypeTag;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One field of a composite key: its name and declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyFieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeTag,
}

impl KeyFieldSpec {
    pub fn new(name: &str, field_type: TypeTag) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Ordered mapping from field name to type.
///
/// Insertion order is significant: it fixes the parameter order of the full
/// constructor of any type synthesized from these specs. Names are unique;
/// re-inserting a name replaces its type in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpecs {
    specs: Vec<KeyFieldSpec>,
    positions: HashMap<String, usize>,
}

impl FieldSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field. Returns the previous type when `name`
    /// was already present; the field keeps its original position.
    pub fn insert(&mut self, name: &str, field_type: TypeTag) -> Option<TypeTag> {
        if let Some(&pos) = self.positions.get(name) {
            let previous = self.specs[pos].field_type;
            self.specs[pos].field_type = field_type;
            return Some(previous);
        }
        self.positions.insert(name.to_string(), self.specs.len());
        self.specs.push(KeyFieldSpec::new(name, field_type));
        None
    }

    pub fn get(&self, name: &str) -> Option<TypeTag> {
        self.positions.get(name).map(|&pos| self.specs[pos].field_type)
    }

    /// Position of `name` in constructor order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyFieldSpec> {
        self.specs.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.name.as_str())
    }

    pub fn as_slice(&self) -> &[KeyFieldSpec] {
        &self.specs
    }
}

impl<'a> IntoIterator for &'a FieldSpecs {
    type Item = &'a KeyFieldSpec;
    type IntoIter = std::slice::Iter<'a, KeyFieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

impl FromIterator<KeyFieldSpec> for FieldSpecs {
    fn from_iter<I: IntoIterator<Item = KeyFieldSpec>>(iter: I) -> Self {
        let mut specs = FieldSpecs::new();
        for spec in iter {
            specs.insert(&spec.name, spec.field_type);
        }
        specs
    }
}

impl<'a> FromIterator<(&'a str, TypeTag)> for FieldSpecs {
    fn from_iter<I: IntoIterator<Item = (&'a str, TypeTag)>>(iter: I) -> Self {
        let mut specs = FieldSpecs::new();
        for (name, field_type) in iter {
            specs.insert(name, field_type);
        }
        specs
    }
}

/// A non-fatal observation recorded while extracting key fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The same key field name appeared twice with different types; the
    /// later type replaced the earlier one.
    DuplicateKeyField {
        entity: String,
        field: String,
        previous: TypeTag,
        current: TypeTag,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateKeyField {
                entity,
                field,
                previous,
                current,
            } => write!(
                f,
                "entity '{entity}': key field '{field}' declared as {previous} and {current}; using {current}"
            ),
        }
    }
}
