use crate::descriptor::FieldSpecs;
use crate::error::{SynthError, SynthResult};
use crate::record::{Record, SynthesizedType};
use keyforge_model::{EntityType, PropertySource};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type CompiledSelector = dyn Fn(&dyn PropertySource) -> SynthResult<Record> + Send + Sync;

/// Inspectable form of a key selector: `owner => new T(owner.A, owner.B)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyExpression {
    pub owner_type: String,
    pub key_type: String,
    /// Owner properties passed to the full constructor, in argument order.
    pub arguments: Vec<String>,
}

impl fmt::Display for KeyExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .arguments
            .iter()
            .map(|a| format!("owner.{a}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({}) owner => new {}({args})", self.owner_type, self.key_type)
    }
}

/// A compiled function from an owner instance to its composite key.
///
/// Built once per entity type; cloning shares the compiled function.
#[derive(Clone)]
pub struct KeySelector {
    key_type: Arc<SynthesizedType>,
    expression: KeyExpression,
    compiled: Arc<CompiledSelector>,
}

impl KeySelector {
    pub fn owner_type(&self) -> &str {
        &self.expression.owner_type
    }

    pub fn key_type(&self) -> &Arc<SynthesizedType> {
        &self.key_type
    }

    pub fn expression(&self) -> &KeyExpression {
        &self.expression
    }

    /// Reads the key properties of `owner` and constructs a key record.
    pub fn extract(&self, owner: &dyn PropertySource) -> SynthResult<Record> {
        (self.compiled)(owner)
    }
}

impl fmt::Debug for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySelector")
            .field("expression", &self.expression.to_string())
            .finish_non_exhaustive()
    }
}

/// Builds a selector reading `fields` from instances of `owner` and passing
/// them, in order, to the full constructor of `synthesized`.
///
/// Fails with a configuration error if `synthesized` has no full constructor,
/// if `fields` does not match the specs it was built from, or if `owner`
/// declares no property for one of the fields.
pub fn compile(
    owner: &EntityType,
    synthesized: &Arc<SynthesizedType>,
    fields: &FieldSpecs,
) -> SynthResult<KeySelector> {
    let ctor = synthesized.full_constructor().ok_or_else(|| {
        SynthError::Configuration(format!(
            "cannot build a key selector for '{}': key type {} has no fields",
            owner.name,
            synthesized.name()
        ))
    })?;

    if synthesized.fields() != fields {
        return Err(SynthError::Configuration(format!(
            "key fields for '{}' do not match those of key type {}",
            owner.name,
            synthesized.name()
        )));
    }

    if let Some(missing) = fields.names().find(|n| owner.property(n).is_none()) {
        return Err(SynthError::Configuration(format!(
            "entity type '{}' has no property '{missing}'",
            owner.name
        )));
    }

    let arguments: Vec<String> = fields.names().map(str::to_string).collect();
    let owner_name = owner.name.clone();
    let reads = arguments.clone();
    let compiled: Arc<CompiledSelector> = Arc::new(move |source: &dyn PropertySource| {
        let args = reads
            .iter()
            .map(|name| {
                source
                    .property(name)
                    .ok_or_else(|| SynthError::MissingProperty {
                        owner: owner_name.clone(),
                        property: name.clone(),
                    })
            })
            .collect::<SynthResult<Vec<_>>>()?;
        ctor.invoke(args)
    });

    let expression = KeyExpression {
        owner_type: owner.name.clone(),
        key_type: synthesized.name().to_string(),
        arguments,
    };
    debug!(owner = %owner.name, selector = %expression, "Compiled key selector");

    Ok(KeySelector {
        key_type: Arc::clone(synthesized),
        expression,
        compiled,
    })
}
