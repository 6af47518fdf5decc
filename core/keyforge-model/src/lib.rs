//! Schema metadata model for keyforge.
//!
//! Defines the vocabulary shared by the key scaffolding engine and its
//! collaborators:
//! - [`TypeTag`] / [`Value`] — the closed set of key field types and their values
//! - [`PropertyDescriptor`], [`KeyGroup`], [`EntityType`] — entity metadata as
//!   supplied by a schema provider
//! - [`SchemaMetadata`] — the provider seam, with [`StaticSchema`] as an
//!   in-memory implementation
//! - [`Entity`] / [`PropertySource`] — owner instances that keys are read from

mod entity;
mod schema;
mod types;

pub use entity::{Entity, PropertySource};
pub use schema::{EntityType, KeyGroup, PropertyDescriptor, SchemaMetadata, StaticSchema};
pub use types::{TypeCategory, TypeTag, Value};

/// Result type alias using the crate's error type.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors raised while reading schema metadata.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
