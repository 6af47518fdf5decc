//! Error types for scaffolding sessions.

use keyforge_model::ModelError;
use keyforge_synth::SynthError;
use thiserror::Error;

/// Result type for scaffolding operations.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Errors raised by a model builder.
#[derive(Debug, Error)]
pub enum ModelConfigError {
    #[error("entity set '{0}' is already registered")]
    DuplicateEntitySet(String),

    #[error("entity type '{0}' already declares a key")]
    KeyAlreadyDeclared(String),

    #[error("model builder rejected request: {0}")]
    Rejected(String),
}

/// Errors that abort the configuration of one entity type.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("schema error: {0}")]
    Schema(#[from] ModelError),

    #[error("model configuration error: {0}")]
    Model(#[from] ModelConfigError),

    #[error("invalid scaffold configuration: {0}")]
    Config(#[from] toml::de::Error),
}
