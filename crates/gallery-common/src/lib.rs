//! Common types and utilities shared across the forecast gallery crates.

pub mod error;
pub mod run;
pub mod time;
pub mod variable;

pub use error::{GalleryError, GalleryResult};
pub use run::RunId;
pub use time::{TimeFormat, ValidTime};
pub use variable::VariableKind;
