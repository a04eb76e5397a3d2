//! Discovery of run directories under the site root.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use gallery_common::{GalleryResult, RunId};

use crate::listing::{list_names, EntryKind};

/// Runs found under the site root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunIndex {
    runs: Vec<RunId>,
    by_date: BTreeMap<NaiveDate, RunId>,
}

impl RunIndex {
    /// Index runs from directory names.
    ///
    /// Names are visited in sorted order, so when several runs share a
    /// calendar date the lexicographically smallest (earliest
    /// initialization hour) is the one linked from that date.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut runs: Vec<(NaiveDate, RunId)> = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let Some(run) = RunId::parse(name) else {
                    debug!(entry = %name, "Skipping non-run entry");
                    return None;
                };
                match run.calendar_date() {
                    Some(date) => Some((date, run)),
                    None => {
                        debug!(run = %run, "Skipping run with invalid calendar date");
                        None
                    }
                }
            })
            .collect();
        runs.sort_by(|a, b| a.1.cmp(&b.1));
        runs.dedup_by(|a, b| a.1 == b.1);

        let mut by_date = BTreeMap::new();
        for (date, run) in &runs {
            by_date.entry(*date).or_insert_with(|| run.clone());
        }

        Self {
            runs: runs.into_iter().map(|(_, run)| run).collect(),
            by_date,
        }
    }

    /// Calendar date → linked run.
    pub fn by_date(&self) -> &BTreeMap<NaiveDate, RunId> {
        &self.by_date
    }

    pub fn run_for(&self, date: NaiveDate) -> Option<&RunId> {
        self.by_date.get(&date)
    }

    /// Every valid run, newest first (the rebuild order).
    pub fn runs_descending(&self) -> Vec<RunId> {
        self.runs.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Scan `root` for `YYYYMMDDHH` directories.
///
/// Non-matching entries and impossible dates are skipped silently; a
/// missing root is an error.
pub fn discover_runs(root: &Path) -> GalleryResult<RunIndex> {
    let names = list_names(root, EntryKind::Directory)?;
    Ok(RunIndex::from_names(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_names_filters() {
        let index = RunIndex::from_names([
            "2025060100",
            "2025061300",
            "2025130100",
            "d01",
            "logo.svg",
            "20250601",
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.run_for(date(2025, 6, 1)).unwrap().as_str(), "2025060100");
        assert_eq!(index.run_for(date(2025, 6, 13)).unwrap().as_str(), "2025061300");
    }

    #[test]
    fn test_same_day_collision_is_order_independent() {
        let forward = RunIndex::from_names(["2025060100", "2025060112"]);
        let reverse = RunIndex::from_names(["2025060112", "2025060100"]);
        assert_eq!(forward, reverse);
        assert_eq!(forward.by_date().len(), 1);
        assert_eq!(forward.run_for(date(2025, 6, 1)).unwrap().as_str(), "2025060100");
        // Both runs are still rebuilt.
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn test_runs_descending() {
        let index = RunIndex::from_names(["2025060100", "2025060300", "2025060200"]);
        let order: Vec<String> = index
            .runs_descending()
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(order, vec!["2025060300", "2025060200", "2025060100"]);
    }
}
