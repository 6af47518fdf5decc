use crate::error::ScaffoldResult;
use crate::model::EntityTypeConfiguration;
use keyforge_synth::KeySelector;
use tracing::debug;

/// Registers `selector` as the composite identity of the entity being
/// configured. Errors from the builder are propagated unchanged.
pub fn assign(
    configuration: &mut dyn EntityTypeConfiguration,
    selector: KeySelector,
) -> ScaffoldResult<()> {
    debug!(
        entity = %configuration.entity_type(),
        selector = %selector.expression(),
        "Assigning composite key"
    );
    configuration.has_key(selector)?;
    Ok(())
}
