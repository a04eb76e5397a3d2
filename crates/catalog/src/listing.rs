//! Sorted, non-recursive directory listings.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use gallery_common::{GalleryError, GalleryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    File,
    Directory,
}

/// Names of the direct children of `dir` of the given kind, sorted by
/// file name. Symlinks are followed; unreadable children and names that
/// are not valid UTF-8 are skipped.
pub(crate) fn list_names(dir: &Path, kind: EntryKind) -> GalleryResult<Vec<String>> {
    ensure_dir(dir)?;

    let mut names = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(GalleryError::io(dir, e.into())),
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let wanted = match kind {
            EntryKind::File => entry.file_type().is_file(),
            EntryKind::Directory => entry.file_type().is_dir(),
        };
        if !wanted {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => debug!(path = %entry.path().display(), "Skipping non UTF-8 name"),
        }
    }

    Ok(names)
}

/// Fail with a typed error unless `dir` is an existing directory.
pub(crate) fn ensure_dir(dir: &Path) -> GalleryResult<()> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(GalleryError::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(GalleryError::MissingDirectory(dir.to_path_buf()))
        }
        Err(e) => Err(GalleryError::io(dir, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_sorted_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("d02")).unwrap();
        fs::create_dir(dir.path().join("d01")).unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();

        assert_eq!(
            list_names(dir.path(), EntryKind::Directory).unwrap(),
            vec!["d01", "d02"]
        );
        assert_eq!(
            list_names(dir.path(), EntryKind::File).unwrap(),
            vec!["a.png", "b.png"]
        );
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("d01/slp")).unwrap();
        fs::write(dir.path().join("d01/slp/x.png"), b"").unwrap();
        assert!(list_names(dir.path(), EntryKind::File).unwrap().is_empty());
    }

    #[test]
    fn test_missing_and_non_directories() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            list_names(&missing, EntryKind::File),
            Err(GalleryError::MissingDirectory(_))
        ));

        let file = dir.path().join("file.txt");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            list_names(&file, EntryKind::File),
            Err(GalleryError::NotADirectory(_))
        ));
    }
}
