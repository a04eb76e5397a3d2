//! Temporary site trees shaped like the plotting pipeline output.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary site root holding one run directory.
///
/// The whole tree is removed when the value is dropped. Helpers panic on
/// I/O failure since they only run inside tests.
pub struct RunTree {
    root: TempDir,
    run: String,
}

impl RunTree {
    pub fn new(run: &str) -> Self {
        let root = tempfile::tempdir().expect("create temp site root");
        fs::create_dir_all(root.path().join(run)).expect("create run directory");
        Self {
            root,
            run: run.to_string(),
        }
    }

    /// Site root (parent of the run directory).
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn run_path(&self) -> PathBuf {
        self.root.path().join(&self.run)
    }

    /// Create an empty frame file at `<run>/<domain>/<variable>/<file_name>`.
    pub fn frame(&self, domain: &str, variable: &str, file_name: &str) -> PathBuf {
        let dir = self.variable_dir(domain, variable);
        let path = dir.join(file_name);
        fs::write(&path, b"").expect("write frame");
        path
    }

    /// Create every frame in `file_names` under one variable.
    pub fn frames<I, S>(&self, domain: &str, variable: &str, file_names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in file_names {
            self.frame(domain, variable, name.as_ref());
        }
    }

    /// Create (or reuse) an empty variable directory.
    pub fn variable_dir(&self, domain: &str, variable: &str) -> PathBuf {
        let dir = self.run_path().join(domain).join(variable);
        fs::create_dir_all(&dir).expect("create variable directory");
        dir
    }

    /// Create an arbitrary file relative to the run directory.
    pub fn file(&self, rel: &str) -> PathBuf {
        let path = self.run_path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, b"").expect("write file");
        path
    }

    /// Create a sibling directory next to the run (another run, or noise).
    pub fn sibling_dir(&self, name: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::create_dir_all(&path).expect("create sibling directory");
        path
    }
}
