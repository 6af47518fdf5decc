//! The model-configuration seam, and an in-memory builder implementing it.

use crate::error::ModelConfigError;
use keyforge_synth::KeySelector;

/// Configuration handle for one entity type.
pub trait EntityTypeConfiguration {
    fn entity_type(&self) -> &str;

    /// Declares the composite identity of this entity type.
    fn has_key(&mut self, selector: KeySelector) -> Result<(), ModelConfigError>;
}

/// Receives entity sets and key declarations from a scaffolding session.
pub trait ModelBuilder {
    fn register_entity_set(&mut self, set_name: &str, entity_type: &str)
    -> Result<(), ModelConfigError>;

    /// Returns the configuration handle for `entity_type`, creating it on
    /// first use.
    fn entity(
        &mut self,
        entity_type: &str,
    ) -> Result<&mut dyn EntityTypeConfiguration, ModelConfigError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySet {
    pub name: String,
    pub entity_type: String,
}

#[derive(Debug, Clone)]
pub struct EntityConfig {
    entity_type: String,
    key: Option<KeySelector>,
}

impl EntityConfig {
    pub fn key(&self) -> Option<&KeySelector> {
        self.key.as_ref()
    }
}

impl EntityTypeConfiguration for EntityConfig {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn has_key(&mut self, selector: KeySelector) -> Result<(), ModelConfigError> {
        if self.key.is_some() {
            return Err(ModelConfigError::KeyAlreadyDeclared(self.entity_type.clone()));
        }
        self.key = Some(selector);
        Ok(())
    }
}

/// A model builder that keeps registrations in memory.
#[derive(Debug, Default)]
pub struct InMemoryModel {
    sets: Vec<EntitySet>,
    entities: Vec<EntityConfig>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_sets(&self) -> &[EntitySet] {
        &self.sets
    }

    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn entity_config(&self, entity_type: &str) -> Option<&EntityConfig> {
        self.entities.iter().find(|e| e.entity_type == entity_type)
    }

    /// The key selector declared for `entity_type`, if any.
    pub fn key_for(&self, entity_type: &str) -> Option<&KeySelector> {
        self.entity_config(entity_type).and_then(EntityConfig::key)
    }
}

impl ModelBuilder for InMemoryModel {
    fn register_entity_set(
        &mut self,
        set_name: &str,
        entity_type: &str,
    ) -> Result<(), ModelConfigError> {
        if self.entity_set(set_name).is_some() {
            return Err(ModelConfigError::DuplicateEntitySet(set_name.to_string()));
        }
        self.sets.push(EntitySet {
            name: set_name.to_string(),
            entity_type: entity_type.to_string(),
        });
        Ok(())
    }

    fn entity(
        &mut self,
        entity_type: &str,
    ) -> Result<&mut dyn EntityTypeConfiguration, ModelConfigError> {
        let index = match self.entities.iter().position(|e| e.entity_type == entity_type) {
            Some(index) => index,
            None => {
                self.entities.push(EntityConfig {
                    entity_type: entity_type.to_string(),
                    key: None,
                });
                self.entities.len() - 1
            }
        };
        Ok(&mut self.entities[index])
    }
}
