//! Human-readable descriptions of diagnostic variables.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Serialize, Serializer};

use gallery_common::{GalleryError, GalleryResult};

/// Shown for variables that have no entry in the table.
pub const MISSING_DESCRIPTION: &str = "Descrição não disponível.";

const BUILTIN_DESCRIPTIONS: &str = include_str!("../assets/descriptions.yaml");

/// Variable key → HTML fragment lookup.
///
/// Independent of any catalog: keys that never appear in a run are
/// harmless, and variables missing from the table resolve to the
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescriptions {
    entries: BTreeMap<String, String>,
    placeholder: String,
}

impl VariableDescriptions {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            placeholder: MISSING_DESCRIPTION.to_string(),
        }
    }

    /// The table shipped with the crate.
    pub fn builtin() -> GalleryResult<Self> {
        Self::from_yaml_str(BUILTIN_DESCRIPTIONS)
    }

    /// Parse a flat `key: "<html>"` YAML mapping.
    pub fn from_yaml_str(yaml: &str) -> GalleryResult<Self> {
        let entries: BTreeMap<String, String> = serde_yaml::from_str(yaml)
            .map_err(|e| GalleryError::Config(format!("invalid description table: {}", e)))?;
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> GalleryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GalleryError::io(path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Add or replace entries from `other`, keeping this table's placeholder.
    pub fn merge(&mut self, other: VariableDescriptions) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Description of `key`, or the placeholder when unknown.
    pub fn describe(&self, key: &str) -> &str {
        self.get(key).unwrap_or(self.placeholder.as_str())
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VariableDescriptions {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl Serialize for VariableDescriptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
