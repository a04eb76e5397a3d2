//! Catalog data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gallery_common::VariableKind;

/// Variables of one domain, keyed by variable directory name.
pub type DomainEntry = BTreeMap<String, VariableFrames>;

/// Full Domain → Variable → frames structure of one run.
///
/// Keys are kept sorted so that serialization is deterministic. Frame
/// paths are relative to the run directory (`domain/variable/file`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    domains: BTreeMap<String, DomainEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_domain(&mut self, name: impl Into<String>, entry: DomainEntry) {
        self.domains.insert(name.into(), entry);
    }

    pub fn domain(&self, name: &str) -> Option<&DomainEntry> {
        self.domains.get(name)
    }

    pub fn variable(&self, domain: &str, variable: &str) -> Option<&VariableFrames> {
        self.domains.get(domain)?.get(variable)
    }

    pub fn domains(&self) -> impl Iterator<Item = (&String, &DomainEntry)> {
        self.domains.iter()
    }

    pub fn domain_names(&self) -> Vec<&str> {
        self.domains.keys().map(|s| s.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn variable_count(&self) -> usize {
        self.domains.values().map(|d| d.len()).sum()
    }

    pub fn frame_count(&self) -> usize {
        self.domains
            .values()
            .flat_map(|d| d.values())
            .map(VariableFrames::frame_count)
            .sum()
    }
}

/// Frames of one variable, shaped by its kind.
///
/// Serialized untagged: a JSON array for single-level variables, an
/// object of level → array for multi-level ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableFrames {
    /// Frame paths ordered by valid time.
    Sequence(Vec<String>),
    /// Level token → frame paths ordered by valid time.
    Levels(BTreeMap<String, Vec<String>>),
}

impl VariableFrames {
    pub fn kind(&self) -> VariableKind {
        match self {
            VariableFrames::Sequence(_) => VariableKind::SingleLevel,
            VariableFrames::Levels(_) => VariableKind::MultiLevel,
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            VariableFrames::Sequence(paths) => paths.len(),
            VariableFrames::Levels(levels) => levels.values().map(Vec::len).sum(),
        }
    }

    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            VariableFrames::Sequence(paths) => Some(paths),
            VariableFrames::Levels(_) => None,
        }
    }

    pub fn level(&self, level: &str) -> Option<&[String]> {
        match self {
            VariableFrames::Sequence(_) => None,
            VariableFrames::Levels(levels) => levels.get(level).map(Vec::as_slice),
        }
    }

    /// Level tokens, highest pressure value first (the order the viewer
    /// presents them in). Non-numeric tokens sort last.
    pub fn levels_descending(&self) -> Vec<&str> {
        let VariableFrames::Levels(levels) = self else {
            return Vec::new();
        };
        let mut keys: Vec<&str> = levels.keys().map(|s| s.as_str()).collect();
        keys.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => y.cmp(&x),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut d01 = DomainEntry::new();
        d01.insert(
            "slp".to_string(),
            VariableFrames::Sequence(vec![
                "d01/slp/slp_01-06-2025_00_00.png".to_string(),
                "d01/slp/slp_01-06-2025_03_00.png".to_string(),
            ]),
        );
        let mut levels = BTreeMap::new();
        levels.insert(
            "500".to_string(),
            vec!["d01/u_temp/u_temp_500_01-06-2025_00_00.png".to_string()],
        );
        levels.insert(
            "1000".to_string(),
            vec!["d01/u_temp/u_temp_1000_01-06-2025_00_00.png".to_string()],
        );
        d01.insert("u_temp".to_string(), VariableFrames::Levels(levels));

        let mut catalog = Catalog::new();
        catalog.insert_domain("d01", d01);
        catalog
    }

    #[test]
    fn test_counts() {
        let catalog = sample();
        assert_eq!(catalog.domain_names(), vec!["d01"]);
        assert_eq!(catalog.variable_count(), 2);
        assert_eq!(catalog.frame_count(), 4);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value["d01"]["slp"].is_array());
        assert!(value["d01"]["u_temp"].is_object());
        assert_eq!(value["d01"]["u_temp"]["500"][0], "d01/u_temp/u_temp_500_01-06-2025_00_00.png");
    }

    #[test]
    fn test_untagged_round_trip() {
        let catalog = sample();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
        assert_eq!(
            back.variable("d01", "u_temp").unwrap().kind(),
            VariableKind::MultiLevel
        );
    }

    #[test]
    fn test_levels_descending_is_numeric() {
        let catalog = sample();
        let frames = catalog.variable("d01", "u_temp").unwrap();
        assert_eq!(frames.levels_descending(), vec!["1000", "500"]);
        assert!(catalog.variable("d01", "slp").unwrap().levels_descending().is_empty());
    }
}
