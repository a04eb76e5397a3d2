//! Forecast-run catalog builder.
//!
//! Turns a run's rendered-image tree
//! (`<run>/<domain>/<variable>/<frame>.png`) into the nested catalog the
//! browser-side player consumes.
//!
//! # Architecture
//!
//! - [`filename`] recovers level and valid time from a single frame name
//! - [`frames`] lists and orders the frames of one variable
//! - [`builder`] walks domains and variables of a run
//! - [`serialize`] emits the catalog as a script-embeddable literal
//! - [`discovery`] maps run directories under the site root to dates

pub mod builder;
pub mod config;
pub mod descriptions;
pub mod discovery;
pub mod filename;
pub mod frames;
mod listing;
pub mod serialize;
pub mod types;

pub use builder::CatalogBuilder;
pub use config::CatalogLayout;
pub use descriptions::{VariableDescriptions, MISSING_DESCRIPTION};
pub use discovery::{discover_runs, RunIndex};
pub use filename::{parse_frame_name, FrameStamp};
pub use frames::{Frame, FrameCollector, FrameSet};
pub use serialize::{
    catalog_script, descriptions_script, from_script, to_script, CATALOG_BINDING,
    DESCRIPTIONS_BINDING,
};
pub use types::{Catalog, DomainEntry, VariableFrames};

pub use gallery_common::{GalleryError, GalleryResult};
