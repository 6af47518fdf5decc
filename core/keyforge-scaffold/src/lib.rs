//! Composite key scaffolding for keyforge.
//!
//! A [`ScaffoldSession`] walks the entity types of a [`SchemaMetadata`]
//! provider and, for each one, extracts its key fields, synthesizes a key
//! record type, compiles a key selector and hands it to a [`ModelBuilder`]
//! through [`assign`]. The session owns the type registry for the duration
//! of one scaffolding run.
//!
//! [`SchemaMetadata`]: keyforge_model::SchemaMetadata

mod adapter;
mod config;
mod error;
mod model;
mod session;

pub use adapter::assign;
pub use config::ScaffoldConfig;
pub use error::{ModelConfigError, ScaffoldError, ScaffoldResult};
pub use model::{EntityConfig, EntitySet, EntityTypeConfiguration, InMemoryModel, ModelBuilder};
pub use session::{ConfiguredEntity, ScaffoldReport, ScaffoldSession};
