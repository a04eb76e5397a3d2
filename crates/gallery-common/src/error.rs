//! Error types for the forecast gallery.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using GalleryError.
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Primary error type for catalog and site operations.
///
/// Filename parse failures are deliberately absent: they are absorbed
/// into the data model, never surfaced as errors.
#[derive(Debug, Error)]
pub enum GalleryError {
    // === Input Layout Errors ===
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Output Errors ===
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialize(String),

    #[error("Template error: {0}")]
    Template(String),

    // === Configuration Errors ===
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GalleryError {
    /// Wrap an I/O error raised while reading `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O error raised while writing `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the error concerns the input tree rather than the outputs.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GalleryError::MissingDirectory(_) | GalleryError::NotADirectory(_) | GalleryError::Io { .. }
        )
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::Serialize(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_mentions_path_and_cause() {
        let err = GalleryError::write(
            "/var/www/html/2025060100/data.js",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("2025060100/data.js"));
        assert!(msg.contains("permission denied"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_missing_directory_is_input_error() {
        let err = GalleryError::MissingDirectory(PathBuf::from("/nope"));
        assert!(err.is_input_error());
        assert_eq!(err.to_string(), "Directory not found: /nope");
    }
}
