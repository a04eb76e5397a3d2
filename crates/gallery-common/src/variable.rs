//! Diagnostic variable classification.

use serde::{Deserialize, Serialize};

/// Whether a variable carries a vertical pressure level per frame.
///
/// Decided once per variable from its directory name, never per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableKind {
    SingleLevel,
    MultiLevel,
}

impl VariableKind {
    /// Classify a variable directory name against the multi-level prefix.
    pub fn classify(variable: &str, multilevel_prefix: &str) -> Self {
        if variable.starts_with(multilevel_prefix) {
            VariableKind::MultiLevel
        } else {
            VariableKind::SingleLevel
        }
    }

    pub fn is_multilevel(&self) -> bool {
        matches!(self, VariableKind::MultiLevel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(VariableKind::classify("u_temp", "u_"), VariableKind::MultiLevel);
        assert_eq!(VariableKind::classify("slp", "u_"), VariableKind::SingleLevel);
        assert_eq!(VariableKind::classify("updraft_helicity", "u_"), VariableKind::SingleLevel);
        assert!(VariableKind::classify("u_winds_temp", "u_").is_multilevel());
    }
}
