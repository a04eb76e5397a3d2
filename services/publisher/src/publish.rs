//! Batch and single-run publishing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{error, info, warn};

use catalog::{
    catalog_script, discover_runs, CatalogBuilder, RunIndex, VariableDescriptions,
};
use gallery_common::{GalleryError, GalleryResult, RunId};
use site::{write_public, LandingPage, ViewerPage};

use crate::config::PublisherConfig;

/// Outcome of publishing one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run: RunId,
    pub domains: usize,
    pub variables: usize,
    pub frames: usize,
}

/// Outcome of one batch over the whole root.
#[derive(Debug, Default, Clone)]
pub struct BatchReport {
    /// Valid run directories found under the root.
    pub runs_found: usize,
    pub landing_written: bool,
    pub published: Vec<RunReport>,
    /// Runs that failed, with the error message.
    pub failed: Vec<(RunId, String)>,
    /// Failures caused by an unreadable run tree rather than a write.
    pub input_failures: usize,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.landing_written && self.failed.is_empty()
    }

    /// Record the outcome of one run.
    pub fn record(&mut self, run: RunId, result: GalleryResult<RunReport>) {
        match result {
            Ok(run_report) => self.published.push(run_report),
            Err(e) => {
                let input = e.is_input_error();
                error!(run = %run, error = %e, input, "Failed to publish run");
                if input {
                    self.input_failures += 1;
                }
                self.failed.push((run, e.to_string()));
            }
        }
    }

    pub fn log_summary(&self) {
        info!(
            runs = self.runs_found,
            published = self.published.len(),
            failed = self.failed.len(),
            input_failures = self.input_failures,
            landing = self.landing_written,
            frames = self.published.iter().map(|r| r.frames).sum::<usize>(),
            "Publish cycle complete"
        );
    }
}

/// Writes gallery artifacts for the runs under a site root.
pub struct Publisher {
    config: PublisherConfig,
    builder: CatalogBuilder,
    descriptions: VariableDescriptions,
}

impl Publisher {
    pub fn new(config: PublisherConfig, descriptions: VariableDescriptions) -> Self {
        let builder = CatalogBuilder::new(config.layout.clone());
        Self {
            config,
            builder,
            descriptions,
        }
    }

    /// Build a publisher, loading the description table the config names.
    ///
    /// `config_dir` anchors a relative description path.
    pub fn from_config(config: PublisherConfig, config_dir: Option<&Path>) -> Result<Self> {
        let descriptions = config.descriptions.load(config_dir)?;
        info!(
            descriptions = descriptions.len(),
            time_format = ?config.layout.time_format,
            "Publisher configured"
        );
        Ok(Self::new(config, descriptions))
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    pub fn descriptions(&self) -> &VariableDescriptions {
        &self.descriptions
    }

    /// Write the landing calendar for the month containing `today`.
    pub fn publish_landing(
        &self,
        root: &Path,
        index: &RunIndex,
        today: NaiveDate,
    ) -> GalleryResult<PathBuf> {
        let html = LandingPage::new(&self.config.site, index, today).render()?;
        let path = root.join(&self.config.output.index_file);
        write_public(&path, &html)?;
        info!(
            path = %path.display(),
            linked_days = index.by_date().len(),
            "Wrote landing page"
        );
        Ok(path)
    }

    /// Rebuild the catalog script and viewer page of one run directory.
    pub fn publish_run(&self, run_path: &Path) -> GalleryResult<RunReport> {
        let run = run_path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(RunId::parse)
            .ok_or_else(|| {
                GalleryError::Config(format!(
                    "{} is not a YYYYMMDDHH run directory",
                    run_path.display()
                ))
            })?;

        let catalog = self.builder.build(run_path)?;
        if catalog.is_empty() {
            warn!(run = %run, "Run has no domains; writing an empty catalog");
        }

        let output = &self.config.output;
        let script = catalog_script(&output.catalog_binding, &catalog)?;
        write_public(&run_path.join(&output.data_file), &script)?;

        let viewer = ViewerPage::new(&self.config.site, &self.descriptions, &self.config.layout, &run)
            .with_data_file(&output.data_file)
            .with_bindings(&output.catalog_binding, &output.descriptions_binding)
            .render()?;
        write_public(&run_path.join(&output.viewer_file), &viewer)?;

        let report = RunReport {
            run,
            domains: catalog.domain_names().len(),
            variables: catalog.variable_count(),
            frames: catalog.frame_count(),
        };
        info!(
            run = %report.run,
            domains = report.domains,
            variables = report.variables,
            frames = report.frames,
            "Published run"
        );
        Ok(report)
    }

    /// Publish every run under `root` plus the landing page.
    ///
    /// Only an unreadable root is an error. Landing and per-run failures
    /// are logged and recorded in the report. `jobs` selects the
    /// parallelism of run rebuilds: 0 uses the global rayon pool, 1 runs
    /// sequentially, larger values use a dedicated pool of that size.
    pub fn publish_all(&self, root: &Path, today: NaiveDate, jobs: usize) -> Result<BatchReport> {
        let index = discover_runs(root)
            .with_context(|| format!("Cannot scan web root {:?}", root))?;

        let mut report = BatchReport {
            runs_found: index.len(),
            ..BatchReport::default()
        };
        if index.is_empty() {
            warn!(root = %root.display(), "No forecast runs found");
        }

        match self.publish_landing(root, &index, today) {
            Ok(_) => report.landing_written = true,
            Err(e) => error!(error = %e, "Failed to write landing page"),
        }

        let runs = index.runs_descending();
        let publish = |run: &RunId| (run.clone(), self.publish_run(&root.join(run.as_str())));
        let results: Vec<(RunId, GalleryResult<RunReport>)> = match jobs {
            1 => runs.iter().map(publish).collect(),
            0 => runs.par_iter().map(publish).collect(),
            n => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Failed to build publishing thread pool")?
                .install(|| runs.par_iter().map(publish).collect()),
        };

        for (run, result) in results {
            report.record(run, result);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{fixtures::names, fixtures::runs, RunTree};

    fn publisher() -> Publisher {
        Publisher::new(PublisherConfig::default(), VariableDescriptions::builtin().unwrap())
    }

    #[test]
    fn test_publish_run_writes_artifacts() {
        let tree = RunTree::new(runs::JUNE_1_00Z);
        tree.frames("d01", "slp", [names::SLP_00Z, names::SLP_03Z]);

        let report = publisher().publish_run(&tree.run_path()).unwrap();
        assert_eq!(report.frames, 2);
        assert!(tree.run_path().join("data.js").is_file());
        assert!(tree.run_path().join("index.html").is_file());
    }

    #[test]
    fn test_publish_run_rejects_non_run_name() {
        let tree = RunTree::new("not-a-run");
        let result = publisher().publish_run(&tree.run_path());
        assert!(matches!(result, Err(GalleryError::Config(_))));
    }

    #[test]
    fn test_publish_run_missing_directory() {
        let tree = RunTree::new(runs::JUNE_1_00Z);
        let result = publisher().publish_run(&tree.root().join(runs::JUNE_2_00Z));
        assert!(matches!(result, Err(GalleryError::MissingDirectory(_))));
    }

    #[test]
    fn test_batch_report_success() {
        let mut report = BatchReport {
            landing_written: true,
            ..BatchReport::default()
        };
        assert!(report.is_success());
        report
            .failed
            .push((RunId::parse(runs::JUNE_1_00Z).unwrap(), "boom".to_string()));
        assert!(!report.is_success());
    }

    #[test]
    fn test_batch_report_separates_input_failures() {
        let mut report = BatchReport::default();
        let run = RunId::parse(runs::JUNE_1_00Z).unwrap();

        report.record(
            run.clone(),
            Err(GalleryError::MissingDirectory(PathBuf::from("/srv/2025060100"))),
        );
        report.record(
            run.clone(),
            Err(GalleryError::write(
                "/srv/2025060100/data.js",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            )),
        );
        report.record(
            run.clone(),
            Ok(RunReport {
                run,
                domains: 1,
                variables: 1,
                frames: 2,
            }),
        );

        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.input_failures, 1);
        assert_eq!(report.published.len(), 1);
    }
}
