//! Shared test utilities for the forecast gallery workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Temporary site/run trees laid out like the plotting pipeline output
//! - Frame name generators for time series
//! - Canned file names for common layouts
//!
//! # Usage
//!
//! ```ignore
//! use test_utils::{RunTree, fixtures};
//!
//! let tree = RunTree::new("2025060100");
//! tree.frame("d01", "slp", fixtures::names::SLP_00Z);
//! ```

pub mod fixtures;
pub mod generators;
pub mod tree;

pub use fixtures::*;
pub use generators::*;
pub use tree::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_and_generator_agree() {
        let tree = RunTree::new("2025060100");
        for name in series("slp", None, start(2025, 6, 1, 0), 3, 3) {
            tree.frame("d01", "slp", &name);
        }
        let dir = tree.run_path().join("d01/slp");
        assert_eq!(std::fs::read_dir(dir).unwrap().count(), 3);
    }
}
