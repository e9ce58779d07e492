//! Error types for `tidyfs-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::{Path, PathBuf};

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to branch on
/// the kind of failure without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The destination of a create/rename/move/copy is already taken.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file or directory name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// A persisted metadata document exists but cannot be decoded.
    #[error("corrupt store {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An OS-level capability (opener, trash) reported a failure.
    #[error("platform error: {0}")]
    Platform(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an I/O error on `path` onto the most specific variant.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                CoreError::PermissionDenied(path.to_path_buf())
            }
            std::io::ErrorKind::AlreadyExists => CoreError::AlreadyExists(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }
}

/// Convenience alias used throughout `tidyfs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
