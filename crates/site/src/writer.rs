//! World-readable atomic output files.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use gallery_common::{GalleryError, GalleryResult};

/// Permission bits of published files.
#[cfg(unix)]
pub const PUBLIC_MODE: u32 = 0o644;

/// Replace `path` with `contents` atomically.
///
/// The data goes to a temporary file in the same directory, which is
/// synced, made world-readable on Unix and then renamed over the target.
/// Readers see either the old file or the new one, never a partial write.
pub fn write_public(path: &Path, contents: &str) -> GalleryResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| GalleryError::write(path, e))?;
    temp.write_all(contents.as_bytes())
        .and_then(|_| temp.flush())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| GalleryError::write(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(PUBLIC_MODE))
            .map_err(|e| GalleryError::write(path, e))?;
    }

    temp.persist(path)
        .map_err(|e| GalleryError::write(path, e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}
