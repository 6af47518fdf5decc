//! Composite key synthesis for keyforge.
//!
//! An entity whose primary key spans several fields has no compile-time type
//! for that key. This crate builds one at configuration time:
//!
//! - [`extract`] — collects the primary-key fields of an entity's key groups
//!   into ordered [`FieldSpecs`]
//! - [`TypeRegistry::synthesize`] — builds a [`SynthesizedType`] exposing one
//!   accessor per field, a no-argument constructor and a full constructor
//! - [`compile`] — builds a [`KeySelector`] mapping an owner instance to a
//!   [`Record`] of the synthesized type
//!
//! # Concurrency
//!
//! A [`TypeRegistry`] is mutated through `&mut self`, so configuration calls
//! against one registry are serialized by the borrow checker. Synthesized
//! types and selectors are immutable and `Send + Sync` once returned.

mod descriptor;
mod error;
mod extract;
mod record;
mod registry;
mod selector;

pub use descriptor::{Diagnostic, FieldSpecs, KeyFieldSpec};
pub use error::{SynthError, SynthResult};
pub use extract::{Extraction, extract};
pub use record::{Accessor, FullConstructor, Record, SynthesizedType};
pub use registry::{SynthTypeId, TypeRegistry};
pub use selector::{KeyExpression, KeySelector, compile};

/// Largest number of fields a synthesized type may have.
///
/// Per-field slot offsets are indexed with a signed 16-bit integer, three
/// offsets per field, so `i16::MAX / 3` is the ceiling.
pub const MAX_FIELDS: usize = i16::MAX as usize / 3;
