//! One scaffolding run over a schema.

use crate::adapter::assign;
use crate::config::ScaffoldConfig;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::model::ModelBuilder;
use keyforge_model::{ModelError, SchemaMetadata};
use keyforge_synth::{Diagnostic, SynthError, SynthTypeId, TypeRegistry, compile, extract};
use tracing::{info, warn};

/// What was configured for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredEntity {
    pub entity_type: String,
    pub entity_set: String,
    /// The synthesized key type, or `None` if the entity has no key.
    pub key_type: Option<SynthTypeId>,
    /// Key field names in constructor order.
    pub key_fields: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of [`ScaffoldSession::configure_all`].
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub configured: Vec<ConfiguredEntity>,
    pub failed: Vec<(String, ScaffoldError)>,
    pub skipped: Vec<String>,
}

impl ScaffoldReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.configured.iter().flat_map(|c| c.diagnostics.iter())
    }
}

/// Owns the type registry for one scaffolding run.
///
/// Configuration calls take `&mut self`, so a session cannot be driven from
/// several threads at once. Drop the session (or call [`finish`]) when the
/// run is over; key selectors handed to the builder keep their own types
/// alive.
///
/// [`finish`]: ScaffoldSession::finish
#[derive(Debug, Default)]
pub struct ScaffoldSession {
    config: ScaffoldConfig,
    registry: TypeRegistry,
}

impl ScaffoldSession {
    pub fn new(config: ScaffoldConfig) -> Self {
        Self {
            config,
            registry: TypeRegistry::new(),
        }
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Configures the entity set and composite key of `entity_type`.
    ///
    /// Extraction, synthesis and selector compilation all run before the
    /// builder is touched, so a failure in any of them leaves the builder
    /// unchanged. Exclusions from the config are not consulted here.
    ///
    /// If the builder rejects the entity set or the key, the error is
    /// returned without rollback: the synthesized type stays in this
    /// session's registry, and a set registered before a rejected key stays
    /// registered without one.
    pub fn configure_entity<S, B>(
        &mut self,
        schema: &S,
        builder: &mut B,
        entity_type: &str,
    ) -> ScaffoldResult<ConfiguredEntity>
    where
        S: SchemaMetadata + ?Sized,
        B: ModelBuilder + ?Sized,
    {
        let owner = schema
            .entity_type(entity_type)
            .ok_or_else(|| ModelError::UnknownEntityType(entity_type.to_string()))?;
        let extraction = extract(entity_type, schema.key_groups(entity_type)?);
        let fields = extraction.fields;
        let entity_set = self.config.entity_set_name(entity_type);

        if fields.is_empty() {
            if self.config.require_key {
                return Err(SynthError::Configuration(format!(
                    "entity type '{entity_type}' has no primary key"
                ))
                .into());
            }
            builder.register_entity_set(&entity_set, entity_type)?;
            warn!(entity = %entity_type, set = %entity_set, "Entity set registered without a key");
            return Ok(ConfiguredEntity {
                entity_type: entity_type.to_string(),
                entity_set,
                key_type: None,
                key_fields: Vec::new(),
                diagnostics: extraction.diagnostics,
            });
        }

        let key_type = self.registry.synthesize(&fields)?;
        let selector = compile(owner, &key_type, &fields)?;

        builder.register_entity_set(&entity_set, entity_type)?;
        assign(builder.entity(entity_type)?, selector)?;

        info!(
            entity = %entity_type,
            set = %entity_set,
            key_type = %key_type.name(),
            key_fields = fields.len(),
            "Configured composite key"
        );
        Ok(ConfiguredEntity {
            entity_type: entity_type.to_string(),
            entity_set,
            key_type: Some(key_type.id()),
            key_fields: fields.names().map(str::to_string).collect(),
            diagnostics: extraction.diagnostics,
        })
    }

    /// Configures every entity type in schema order. A failure aborts only
    /// the entity it occurred in.
    pub fn configure_all<S, B>(&mut self, schema: &S, builder: &mut B) -> ScaffoldReport
    where
        S: SchemaMetadata + ?Sized,
        B: ModelBuilder + ?Sized,
    {
        let mut report = ScaffoldReport::default();
        for name in schema.entity_type_names() {
            if self.config.is_excluded(name) {
                info!(entity = %name, "Skipping excluded entity type");
                report.skipped.push(name.to_string());
                continue;
            }
            match self.configure_entity(schema, builder, name) {
                Ok(configured) => report.configured.push(configured),
                Err(e) => {
                    warn!(entity = %name, error = %e, "Entity configuration failed");
                    report.failed.push((name.to_string(), e));
                }
            }
        }
        report
    }

    /// Ends the session, returning the types it synthesized.
    pub fn finish(self) -> TypeRegistry {
        self.registry
    }
}
