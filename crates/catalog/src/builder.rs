//! Catalog assembly for one run directory.

use std::path::Path;

use tracing::{debug, info};

use gallery_common::GalleryResult;

use crate::config::CatalogLayout;
use crate::frames::FrameCollector;
use crate::listing::{ensure_dir, list_names, EntryKind};
use crate::types::{Catalog, DomainEntry};

/// Walks a run's domains and variables into a [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    layout: CatalogLayout,
}

impl CatalogBuilder {
    pub fn new(layout: CatalogLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    /// Build the catalog of the run at `run_path`.
    ///
    /// Domains are the subdirectories carrying the domain prefix; every
    /// subdirectory of a domain is a variable. Both are visited in sorted
    /// order. A run without domains yields an empty catalog.
    pub fn build(&self, run_path: &Path) -> GalleryResult<Catalog> {
        ensure_dir(run_path)?;

        let collector = FrameCollector::new(&self.layout);
        let mut catalog = Catalog::new();

        for domain in list_names(run_path, EntryKind::Directory)? {
            if !self.layout.is_domain(&domain) {
                debug!(run = %run_path.display(), entry = %domain, "Skipping non-domain directory");
                continue;
            }

            let domain_path = run_path.join(&domain);
            let mut entry = DomainEntry::new();

            for variable in list_names(&domain_path, EntryKind::Directory)? {
                let frames = collector.collect(&domain_path, &variable)?;
                debug!(
                    domain = %domain,
                    variable = %variable,
                    kind = ?frames.kind(),
                    frames = frames.frame_count(),
                    "Collected variable frames"
                );
                let catalog_entry = frames.into_catalog_entry(&domain, &variable);
                entry.insert(variable, catalog_entry);
            }

            catalog.insert_domain(domain, entry);
        }

        info!(
            run = %run_path.display(),
            domains = catalog.domain_names().len(),
            variables = catalog.variable_count(),
            frames = catalog.frame_count(),
            "Built run catalog"
        );

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use gallery_common::GalleryError;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_build_skips_non_domains() {
        let run = tempfile::tempdir().unwrap();
        touch(run.path(), "d01/slp/slp_01-06-2025_00_00.png");
        touch(run.path(), "static/slp/slp_01-06-2025_00_00.png");
        touch(run.path(), "data.js");

        let catalog = CatalogBuilder::default().build(run.path()).unwrap();
        assert_eq!(catalog.domain_names(), vec!["d01"]);
    }

    #[test]
    fn test_build_empty_run() {
        let run = tempfile::tempdir().unwrap();
        let catalog = CatalogBuilder::default().build(run.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_build_missing_run() {
        let run = tempfile::tempdir().unwrap();
        let result = CatalogBuilder::default().build(&run.path().join("2025060100"));
        assert!(matches!(result, Err(GalleryError::MissingDirectory(_))));
    }

    #[test]
    fn test_empty_variable_directory_is_kept() {
        let run = tempfile::tempdir().unwrap();
        fs::create_dir_all(run.path().join("d01/u_temp")).unwrap();
        fs::create_dir_all(run.path().join("d01/slp")).unwrap();

        let catalog = CatalogBuilder::default().build(run.path()).unwrap();
        assert_eq!(catalog.variable("d01", "u_temp").unwrap().frame_count(), 0);
        assert!(catalog.variable("d01", "slp").unwrap().as_sequence().unwrap().is_empty());
    }
}
