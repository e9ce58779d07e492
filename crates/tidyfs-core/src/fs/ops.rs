//! Filesystem mutation primitives.
//!
//! These are the raw operations behind the [`FileManager`](crate::manager::FileManager)
//! facade. None of them records history; the facade does that after a call
//! succeeds. Destinations are never overwritten.

use std::fs::{self, FileTimes};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Creates a directory (and any missing parents).
///
/// # Errors
///
/// - [`CoreError::AlreadyExists`] if anything already exists at `path`.
/// - [`CoreError::PermissionDenied`] / [`CoreError::Io`] on I/O failure.
pub fn create_folder(path: &Path) -> CoreResult<()> {
    if fs::symlink_metadata(path).is_ok() {
        return Err(CoreError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CoreError::from_io(e, parent))?;
    }
    fs::create_dir(path).map_err(|e| CoreError::from_io(e, path))
}

/// Renames `old` to the full path `new`.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `old` does not exist.
/// - [`CoreError::InvalidName`] if the final component of `new` is not a valid name.
/// - [`CoreError::AlreadyExists`] if `new` is taken.
/// - [`CoreError::Io`] for any other I/O failure.
pub fn rename_path(old: &Path, new: &Path) -> CoreResult<()> {
    if fs::symlink_metadata(old).is_err() {
        return Err(CoreError::NotFound(old.to_path_buf()));
    }

    let new_name = new
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_valid_filename(&new_name) {
        return Err(CoreError::InvalidName(new_name));
    }

    if fs::symlink_metadata(new).is_ok() {
        return Err(CoreError::AlreadyExists(new.to_path_buf()));
    }

    fs::rename(old, new).map_err(|e| CoreError::from_io(e, old))
}

/// Copies a file or directory tree to `dest`.
///
/// Regular files keep their permissions and access/modification times.
/// Directories are copied recursively; symbolic links are recreated as links.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::AlreadyExists`] if `dest` exists.
/// - [`CoreError::Io`] for any I/O failure during copy.
pub fn copy_path(src: &Path, dest: &Path) -> CoreResult<()> {
    let meta = fs::symlink_metadata(src).map_err(|e| CoreError::from_io(e, src))?;

    if fs::symlink_metadata(dest).is_ok() {
        return Err(CoreError::AlreadyExists(dest.to_path_buf()));
    }

    if meta.is_dir() {
        ensure_outside(src, dest)?;
        if let Err(e) = copy_dir_recursive(src, dest, 0) {
            if let Err(cleanup) = fs::remove_dir_all(dest) {
                tracing::debug!("could not remove partial copy {}: {cleanup}", dest.display());
            }
            return Err(e);
        }
    } else {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        if meta.is_symlink() {
            copy_symlink(src, dest)?;
        } else {
            copy_file_preserving(src, dest, &meta)?;
        }
    }

    Ok(())
}

/// Rejects a `dest` that lies inside the directory `src`.
///
/// `dest` does not exist yet, so it is resolved through its nearest
/// existing ancestor.
fn ensure_outside(src: &Path, dest: &Path) -> CoreResult<()> {
    let src = fs::canonicalize(src).map_err(|e| CoreError::from_io(e, src))?;
    if resolve_target(dest).starts_with(&src) {
        return Err(CoreError::InvalidName(format!(
            "cannot place {} inside itself",
            src.display()
        )));
    }
    Ok(())
}

fn resolve_target(dest: &Path) -> PathBuf {
    let mut existing = dest;
    let mut rest = Vec::new();
    loop {
        let probe = if existing.as_os_str().is_empty() {
            Path::new(".")
        } else {
            existing
        };
        if let Ok(resolved) = fs::canonicalize(probe) {
            return rest.iter().rev().fold(resolved, |path, part| path.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return dest.to_path_buf(),
        }
    }
}

/// Maximum recursion depth for copy_dir_recursive to prevent symlink loops.
const MAX_COPY_DEPTH: usize = 64;

fn copy_dir_recursive(src: &Path, dest: &Path, depth: usize) -> CoreResult<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(CoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"),
        )));
    }

    // list before creating dest so it never shows up in its own source
    let entries = fs::read_dir(src)?.collect::<std::io::Result<Vec<_>>>()?;
    fs::create_dir_all(dest)?;

    for entry in entries {
        let entry_path = entry.path();
        let target = dest.join(entry.file_name());

        // file_type() does not follow symlinks
        let ft = entry.file_type()?;

        if ft.is_symlink() {
            copy_symlink(&entry_path, &target)?;
        } else if ft.is_dir() {
            copy_dir_recursive(&entry_path, &target, depth + 1)?;
        } else {
            let meta = entry.metadata()?;
            copy_file_preserving(&entry_path, &target, &meta)?;
        }
    }

    Ok(())
}

fn copy_symlink(src: &Path, dest: &Path) -> CoreResult<()> {
    #[cfg(unix)]
    {
        let link_target = fs::read_link(src)?;
        std::os::unix::fs::symlink(&link_target, dest)?;
    }
    #[cfg(not(unix))]
    {
        fs::copy(src, dest)?;
    }
    Ok(())
}

/// `fs::copy` carries permissions; timestamps are restored afterwards.
fn copy_file_preserving(src: &Path, dest: &Path, meta: &fs::Metadata) -> CoreResult<()> {
    fs::copy(src, dest)?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }

    let handle = fs::File::options()
        .write(true)
        .open(dest)
        .or_else(|_| fs::File::open(dest));
    match handle.and_then(|file| file.set_times(times)) {
        Ok(()) => {}
        Err(e) => tracing::debug!("could not restore times on {}: {e}", dest.display()),
    }
    Ok(())
}

/// Moves a file or directory to `dest`.
///
/// Attempts a fast `rename` first. Only when the rename crosses devices
/// does it fall back to copy + delete.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::AlreadyExists`] if `dest` exists.
/// - [`CoreError::InvalidName`] if `dest` lies inside the directory `src`.
/// - [`CoreError::Io`] for any I/O failure.
pub fn move_path(src: &Path, dest: &Path) -> CoreResult<()> {
    let meta = fs::symlink_metadata(src).map_err(|e| CoreError::from_io(e, src))?;
    if fs::symlink_metadata(dest).is_ok() {
        return Err(CoreError::AlreadyExists(dest.to_path_buf()));
    }
    if meta.is_dir() {
        ensure_outside(src, dest)?;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| CoreError::from_io(e, parent))?;
    }

    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            tracing::debug!("rename {} crosses devices, copying instead", src.display());
            copy_path(src, dest)?;
            delete_path(src)
        }
        Err(e) => Err(CoreError::from_io(e, src)),
    }
}

/// Permanently deletes a file or directory (recursively).
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::Io`] for any I/O failure during deletion.
pub fn delete_path(path: &Path) -> CoreResult<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(|e| CoreError::from_io(e, path))?;
    } else {
        // regular files and symlinks
        fs::remove_file(path).map_err(|e| CoreError::from_io(e, path))?;
    }

    Ok(())
}

pub(crate) fn is_valid_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains('/') || name.contains('\0') {
        return false;
    }
    #[cfg(windows)]
    if name.contains('\\') || name.contains(':') {
        return false;
    }
    true
}
