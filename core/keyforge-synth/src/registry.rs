use crate::descriptor::FieldSpecs;
use crate::error::{SynthError, SynthResult};
use crate::record::SynthesizedType;
use crate::MAX_FIELDS;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Identifies a synthesized type within the registry that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynthTypeId(u64);

impl SynthTypeId {
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SynthTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns every type synthesized during one configuration session.
///
/// The registry only grows: types are never pruned or interned, so two
/// calls with identical field specs produce two distinct types. Dropping the
/// registry releases its handles; types still referenced elsewhere (for
/// example by a key selector) stay alive through their `Arc`.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<Arc<SynthesizedType>>,
    next_id: u64,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a new record type with one typed slot per field spec.
    ///
    /// Fails with [`SynthError::SynthesisLimitExceeded`] when there are more
    /// than [`MAX_FIELDS`] specs. A failed call leaves the registry unchanged.
    pub fn synthesize(&mut self, fields: &FieldSpecs) -> SynthResult<Arc<SynthesizedType>> {
        if fields.len() > MAX_FIELDS {
            return Err(SynthError::SynthesisLimitExceeded {
                count: fields.len(),
                max: MAX_FIELDS,
            });
        }

        self.next_id += 1;
        let id = SynthTypeId(self.next_id);
        let ty = Arc::new(SynthesizedType::new(id, format!("KeyRecord{id}"), fields.clone()));
        debug!(
            type_id = %id,
            name = %ty.name(),
            field_count = fields.len(),
            "Synthesized key record type"
        );
        self.types.push(Arc::clone(&ty));
        Ok(ty)
    }

    pub fn get(&self, id: SynthTypeId) -> Option<&Arc<SynthesizedType>> {
        self.types.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SynthesizedType>> {
        self.types.iter()
    }
}
