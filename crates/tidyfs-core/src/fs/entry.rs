//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::fs::hash::Fingerprint;

/// Detailed information about a single file or directory.
///
/// `FileEntry` is immutable: build it with [`FileEntry::new`] and attach a
/// fingerprint with [`FileEntry::with_fingerprint`], which returns a new value.
/// Directory sizes are reported as `0`; use the disk usage analyzer for
/// recursive totals.
///
/// # Examples
///
/// ```no_run
/// use tidyfs_core::FileEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("Cargo.toml").unwrap();
/// let entry = FileEntry::new("Cargo.toml".into(), &metadata);
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert_eq!(entry.extension(), Some(".toml"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    size: u64,
    created: Option<SystemTime>,
    modified: Option<SystemTime>,
    accessed: Option<SystemTime>,
    is_dir: bool,
    is_symlink: bool,
    extension: Option<String>,
    permissions: Option<u32>,
    fingerprint: Option<Fingerprint>,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// The extension keeps its leading dot and is only set for non-directories.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let is_dir = metadata.is_dir();
        let extension = if is_dir {
            None
        } else {
            dotted_extension(&path)
        };

        Self {
            size: if is_dir { 0 } else { metadata.len() },
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
            is_dir,
            is_symlink: metadata.is_symlink(),
            extension,
            permissions: permission_bits(metadata),
            fingerprint: None,
            path,
            name,
        }
    }

    /// Returns a copy of this entry carrying `fingerprint`.
    #[must_use]
    pub fn with_fingerprint(self, fingerprint: Fingerprint) -> Self {
        Self {
            fingerprint: Some(fingerprint),
            ..self
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn accessed(&self) -> Option<SystemTime> {
        self.accessed
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Extension including the leading dot, e.g. `".jpg"`.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Unix permission bits (`mode & 0o777`). `None` on other platforms.
    pub fn permissions(&self) -> Option<u32> {
        self.permissions
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }
}

/// Returns the extension of `path` with a leading dot, or `None` if it has none.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &std::fs::Metadata) -> Option<u32> {
    None
}
