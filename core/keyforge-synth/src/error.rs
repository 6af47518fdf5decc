//! Error types for key synthesis.

use keyforge_model::TypeTag;
use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while synthesizing key types or extracting keys.
#[derive(Debug, Error)]
pub enum SynthError {
    /// A precondition of the requested operation does not hold.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Too many fields for a single synthesized type.
    #[error("synthesis limit exceeded: {count} fields requested, maximum is {max}")]
    SynthesisLimitExceeded { count: usize, max: usize },

    #[error("type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: TypeTag,
        actual: String,
    },

    #[error("constructor arity mismatch: expected {expected} arguments, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// The owner instance has no value for a key property.
    #[error("owner '{owner}' has no value for key property '{property}'")]
    MissingProperty { owner: String, property: String },

    #[error("type '{ty}' has no field '{field}'")]
    UnknownField { ty: String, field: String },

    /// A record was passed to an accessor belonging to a different type.
    #[error("record of type '{actual}' used with accessor of type '{expected}'")]
    ForeignRecord { expected: String, actual: String },
}
