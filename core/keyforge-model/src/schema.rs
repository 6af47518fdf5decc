use crate::{ModelError, ModelResult, TypeTag};
use serde::{Deserialize, Serialize};

/// One property of an entity type, as reported by the schema provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: TypeTag,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_nullable: bool,
}

impl PropertyDescriptor {
    fn simple(name: &str, property_type: TypeTag, is_primary_key: bool) -> Self {
        Self {
            name: name.into(),
            property_type,
            is_primary_key,
            is_nullable: false,
        }
    }

    /// Shorthand for a primary-key property.
    pub fn key(name: &str, property_type: TypeTag) -> Self {
        Self::simple(name, property_type, true)
    }

    /// Shorthand for a non-key property.
    pub fn column(name: &str, property_type: TypeTag) -> Self {
        Self::simple(name, property_type, false)
    }

    /// Marks the property as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }
}

/// A set of properties that together identify an entity (a primary or
/// alternate key). Only properties flagged `is_primary_key` contribute to
/// the composite identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub properties: Vec<PropertyDescriptor>,
}

impl KeyGroup {
    pub fn new(properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            name: None,
            properties,
        }
    }

    pub fn named(name: &str, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            name: Some(name.into()),
            properties,
        }
    }
}

/// Metadata for one entity type: its readable properties and its key groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub key_groups: Vec<KeyGroup>,
}

impl EntityType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            key_groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds a key group. Its properties also become readable properties of
    /// the entity unless one with the same name is already declared.
    #[must_use]
    pub fn with_key_group(mut self, group: KeyGroup) -> Self {
        for property in &group.properties {
            if self.property(&property.name).is_none() {
                self.properties.push(property.clone());
            }
        }
        self.key_groups.push(group);
        self
    }

    /// Looks up a readable property by name. Properties declared only
    /// inside a key group are readable too.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .chain(self.key_groups.iter().flat_map(|g| g.properties.iter()))
            .find(|p| p.name == name)
    }
}

/// Supplies entity metadata to the scaffolding engine.
pub trait SchemaMetadata {
    /// Names of all entity types, in declaration order.
    fn entity_type_names(&self) -> Vec<&str>;

    fn entity_type(&self, name: &str) -> Option<&EntityType>;

    /// The key groups of `name`, in declaration order.
    fn key_groups(&self, name: &str) -> ModelResult<&[KeyGroup]> {
        self.entity_type(name)
            .map(|e| e.key_groups.as_slice())
            .ok_or_else(|| ModelError::UnknownEntityType(name.to_string()))
    }
}

/// An in-memory schema, typically built in code or loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSchema {
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a schema from its JSON representation.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds an entity type, replacing any existing one with the same name.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityType) -> Self {
        match self.entity_types.iter_mut().find(|e| e.name == entity.name) {
            Some(existing) => *existing = entity,
            None => self.entity_types.push(entity),
        }
        self
    }
}

impl SchemaMetadata for StaticSchema {
    fn entity_type_names(&self) -> Vec<&str> {
        self.entity_types.iter().map(|e| e.name.as_str()).collect()
    }

    fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name == name)
    }
}
