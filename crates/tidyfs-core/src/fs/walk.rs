//! Directory traversal shared by the analyzers.
//!
//! [`walk`] yields every entry below a root (the root itself excluded) in
//! directory-listing order. That order is whatever the filesystem returns
//! and is not stable across platforms; set [`WalkOptions::sorted`] when a
//! reproducible order matters. Unreadable entries are logged and skipped.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// Knobs for [`walk`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Sort siblings by file name instead of using raw listing order.
    pub sorted: bool,
    /// Maximum depth below the root (`1` = immediate children). `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    pub fn sorted(sorted: bool) -> Self {
        Self {
            sorted,
            ..Self::default()
        }
    }
}

/// Lazy recursive iterator over the entries below a root.
///
/// Symbolic links are reported but never followed.
pub struct Walk {
    inner: walkdir::IntoIter,
}

impl Iterator for Walk {
    type Item = DirEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => return Some(entry),
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {e}");
                }
            }
        }
    }
}

/// Starts a traversal of `root`. The root itself is not yielded.
pub fn walk(root: &Path, options: WalkOptions) -> Walk {
    let mut walker = WalkDir::new(root).min_depth(1).follow_links(false);
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }
    if options.sorted {
        walker = walker.sort_by_file_name();
    }
    Walk {
        inner: walker.into_iter(),
    }
}

/// Checks that `path` exists and is a directory.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
pub fn ensure_dir(path: &Path) -> CoreResult<()> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Reads the immediate contents of a directory and returns them as [`FileEntry`] values.
///
/// Entries come back in listing order unless `sorted` is set. Entries whose
/// metadata cannot be read are skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
/// - [`CoreError::PermissionDenied`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
pub fn read_directory(path: &Path, sorted: bool) -> CoreResult<Vec<FileEntry>> {
    ensure_dir(path)?;

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(e, path))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let metadata = match dir_entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("no metadata for {}: {e}", dir_entry.path().display());
                continue;
            }
        };
        entries.push(FileEntry::new(dir_entry.path(), &metadata));
    }

    if sorted {
        entries.sort_by(|a, b| a.path().cmp(b.path()));
    }

    Ok(entries)
}
