//! Frame collection for one (domain, variable) pair.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use gallery_common::{GalleryResult, VariableKind};

use crate::config::CatalogLayout;
use crate::filename::{parse_frame_name, FrameStamp};
use crate::listing::{list_names, EntryKind};
use crate::types::VariableFrames;

/// One rendered image of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file_name: String,
    pub stamp: FrameStamp,
}

/// Ordered frames of one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSet {
    /// Single-level: every candidate, unparsable ones first.
    Sequence(Vec<Frame>),
    /// Multi-level: parsed frames grouped by level; unparsable ones dropped.
    Levels(BTreeMap<String, Vec<Frame>>),
}

impl FrameSet {
    pub fn kind(&self) -> VariableKind {
        match self {
            FrameSet::Sequence(_) => VariableKind::SingleLevel,
            FrameSet::Levels(_) => VariableKind::MultiLevel,
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            FrameSet::Sequence(frames) => frames.len(),
            FrameSet::Levels(levels) => levels.values().map(Vec::len).sum(),
        }
    }

    /// Convert to catalog form, with paths relative to the run directory.
    pub fn into_catalog_entry(self, domain: &str, variable: &str) -> VariableFrames {
        let path = |frame: Frame| format!("{}/{}/{}", domain, variable, frame.file_name);
        match self {
            FrameSet::Sequence(frames) => {
                VariableFrames::Sequence(frames.into_iter().map(path).collect())
            }
            FrameSet::Levels(levels) => VariableFrames::Levels(
                levels
                    .into_iter()
                    .map(|(level, frames)| (level, frames.into_iter().map(path).collect::<Vec<_>>()))
                    .collect(),
            ),
        }
    }
}

/// Lists, classifies and orders the frames of a variable directory.
pub struct FrameCollector<'a> {
    layout: &'a CatalogLayout,
}

impl<'a> FrameCollector<'a> {
    pub fn new(layout: &'a CatalogLayout) -> Self {
        Self { layout }
    }

    /// Collect the frames under `domain_path/variable`.
    ///
    /// Only regular files ending in the image extension are candidates;
    /// anything else in the directory is ignored.
    pub fn collect(&self, domain_path: &Path, variable: &str) -> GalleryResult<FrameSet> {
        let variable_path = domain_path.join(variable);
        let candidates: Vec<String> = list_names(&variable_path, EntryKind::File)?
            .into_iter()
            .filter(|name| self.layout.is_image(name))
            .collect();

        Ok(self.group(variable, candidates))
    }

    /// Parse and order already-listed file names.
    ///
    /// The sort is stable, so frames with equal valid times keep the
    /// order in which `file_names` yields them.
    pub fn group<I>(&self, variable: &str, file_names: I) -> FrameSet
    where
        I: IntoIterator<Item = String>,
    {
        let kind = self.layout.classify(variable);
        let frames = file_names.into_iter().map(|file_name| {
            let stamp = parse_frame_name(
                &file_name,
                kind,
                self.layout.time_format,
                &self.layout.image_extension,
            );
            Frame { file_name, stamp }
        });

        match kind {
            VariableKind::SingleLevel => {
                let mut frames: Vec<Frame> = frames.collect();
                let unparsed = frames.iter().filter(|f| !f.stamp.is_parsed()).count();
                if unparsed > 0 {
                    debug!(variable, unparsed, "Keeping unparsable frames at sequence start");
                }
                frames.sort_by_key(|f| f.stamp.valid_time);
                FrameSet::Sequence(frames)
            }
            VariableKind::MultiLevel => {
                let mut levels: BTreeMap<String, Vec<Frame>> = BTreeMap::new();
                for frame in frames {
                    match frame.stamp.level.clone() {
                        Some(level) => levels.entry(level).or_default().push(frame),
                        None => debug!(
                            variable,
                            file = %frame.file_name,
                            "Dropping multi-level frame without a recoverable level"
                        ),
                    }
                }
                for group in levels.values_mut() {
                    group.sort_by_key(|f| f.stamp.valid_time);
                }
                FrameSet::Levels(levels)
            }
        }
    }
}
