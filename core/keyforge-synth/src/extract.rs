use crate::descriptor::{Diagnostic, FieldSpecs};
use keyforge_model::KeyGroup;
use tracing::warn;

/// The outcome of key descriptor extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub fields: FieldSpecs,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collects the primary-key properties of `groups` into ordered field specs.
///
/// Groups are visited in order, then properties within each group, and that
/// order becomes the constructor order. A name seen again with a different
/// type is replaced in place and reported as a diagnostic. An entity with no
/// primary-key properties yields empty specs.
pub fn extract(entity: &str, groups: &[KeyGroup]) -> Extraction {
    let mut extraction = Extraction::default();

    for property in groups
        .iter()
        .flat_map(|g| g.properties.iter())
        .filter(|p| p.is_primary_key)
    {
        let current = property.property_type;
        match extraction.fields.insert(&property.name, current) {
            Some(previous) if previous != current => {
                warn!(
                    entity = %entity,
                    field = %property.name,
                    %previous,
                    %current,
                    "Duplicate key field with conflicting types; later declaration wins"
                );
                extraction.diagnostics.push(Diagnostic::DuplicateKeyField {
                    entity: entity.to_string(),
                    field: property.name.clone(),
                    previous,
                    current,
                });
            }
            _ => {}
        }
    }

    extraction
}
