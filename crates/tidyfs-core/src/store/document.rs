//! JSON document persistence shared by the metadata stores.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Loads a document, distinguishing "absent" from "unreadable".
///
/// A missing file yields `T::default()`.
///
/// # Errors
///
/// - [`CoreError::CorruptStore`] if the file exists but does not decode as `T`.
/// - [`CoreError::PermissionDenied`] / [`CoreError::Io`] if it cannot be read.
pub fn load_document_strict<T>(path: &Path) -> CoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(CoreError::from_io(e, path)),
    };
    serde_json::from_str(&contents).map_err(|e| CoreError::CorruptStore {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Loads a document, returning an empty default on any error.
pub fn load_document<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    load_document_strict(path).unwrap_or_else(|e| {
        tracing::warn!("using empty document in place of {}: {e}", path.display());
        T::default()
    })
}

/// Overwrites the document at `path`, creating parent directories as needed.
pub fn save_document<T: Serialize>(path: &Path, document: &T) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CoreError::from_io(e, parent))?;
    }
    let json = serde_json::to_string_pretty(document).map_err(std::io::Error::from)?;
    std::fs::write(path, json).map_err(|e| CoreError::from_io(e, path))
}
