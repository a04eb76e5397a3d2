//! Input layout conventions.

use serde::{Deserialize, Serialize};

use gallery_common::{GalleryError, GalleryResult, TimeFormat, VariableKind};

/// Naming conventions of a run's output tree.
///
/// Passed to [`crate::CatalogBuilder`] at construction; nothing in the
/// catalog crate reads global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogLayout {
    /// Prefix a run subdirectory must carry to count as a domain.
    pub domain_prefix: String,
    /// Prefix marking a variable as multi-level.
    pub multilevel_prefix: String,
    /// Frame file extension, without the dot.
    pub image_extension: String,
    /// Grammar of the time fields in frame names.
    pub time_format: TimeFormat,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self {
            domain_prefix: "d0".to_string(),
            multilevel_prefix: "u_".to_string(),
            image_extension: "png".to_string(),
            time_format: TimeFormat::Underscore,
        }
    }
}

impl CatalogLayout {
    pub fn validate(&self) -> GalleryResult<()> {
        if self.domain_prefix.is_empty() {
            return Err(GalleryError::Config("domain_prefix cannot be empty".into()));
        }
        if self.multilevel_prefix.is_empty() {
            return Err(GalleryError::Config(
                "multilevel_prefix cannot be empty".into(),
            ));
        }
        if self.image_extension.is_empty() || self.image_extension.contains(['.', '/']) {
            return Err(GalleryError::Config(format!(
                "image_extension must be a bare extension like \"png\", got {:?}",
                self.image_extension
            )));
        }
        Ok(())
    }

    pub fn is_domain(&self, name: &str) -> bool {
        name.starts_with(&self.domain_prefix)
    }

    pub fn classify(&self, variable: &str) -> VariableKind {
        VariableKind::classify(variable, &self.multilevel_prefix)
    }

    /// Whether `file_name` ends in `.<image_extension>`.
    pub fn is_image(&self, file_name: &str) -> bool {
        self.strip_extension(file_name).is_some()
    }

    pub fn strip_extension<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.image_extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_conventions() {
        let layout = CatalogLayout::default();
        assert!(layout.is_domain("d01"));
        assert!(layout.is_domain("d02"));
        assert!(!layout.is_domain("static"));
        assert!(layout.classify("u_temp").is_multilevel());
        assert!(!layout.classify("slp").is_multilevel());
        layout.validate().unwrap();
    }

    #[test]
    fn test_is_image() {
        let layout = CatalogLayout::default();
        assert!(layout.is_image("slp_01-06-2025_00_00.png"));
        assert!(!layout.is_image("slp_01-06-2025_00_00.PNG"));
        assert!(!layout.is_image("notes.txt"));
        assert!(!layout.is_image("png"));
        assert_eq!(layout.strip_extension("a.png"), Some("a"));
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let layout = CatalogLayout {
            image_extension: ".png".to_string(),
            ..Default::default()
        };
        assert!(matches!(layout.validate(), Err(GalleryError::Config(_))));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let layout: CatalogLayout = serde_yaml::from_str("time_format: colon\n").unwrap();
        assert_eq!(layout.time_format, TimeFormat::Colon);
        assert_eq!(layout.domain_prefix, "d0");
    }
}
