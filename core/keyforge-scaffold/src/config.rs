//! Scaffolding options, parsed from TOML text.

use crate::error::ScaffoldResult;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Fail entity types that have no primary-key fields. When `false` their
    /// entity set is registered without a key.
    #[serde(default = "default_require_key")]
    pub require_key: bool,
    /// Entity set name per entity type. Unlisted types use their own name.
    #[serde(default)]
    pub entity_sets: BTreeMap<String, String>,
    /// Entity types left out of a full scaffolding run.
    #[serde(default)]
    pub exclude: BTreeSet<String>,
}

fn default_require_key() -> bool {
    true
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            require_key: default_require_key(),
            entity_sets: BTreeMap::new(),
            exclude: BTreeSet::new(),
        }
    }
}

impl ScaffoldConfig {
    pub fn from_toml_str(contents: &str) -> ScaffoldResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn entity_set_name(&self, entity_type: &str) -> String {
        self.entity_sets
            .get(entity_type)
            .cloned()
            .unwrap_or_else(|| entity_type.to_string())
    }

    pub fn is_excluded(&self, entity_type: &str) -> bool {
        self.exclude.contains(entity_type)
    }
}
