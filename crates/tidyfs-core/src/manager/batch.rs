//! Batch mutations with per-item failure accounting.
//!
//! Every batch call processes all of its inputs in order. A failing item is
//! logged and skipped; the call returns how many items succeeded. Nothing is
//! rolled back, so a partial failure leaves the earlier items mutated.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::dotted_extension;
use crate::fs::ops::is_valid_filename;

use super::FileManager;

/// Builds the new file name for `path` as the `n`-th item of a batch rename.
///
/// `{n}` is replaced by the counter, `{name}` by the original stem and
/// `{ext}` by the original extension including its dot. The extension is
/// appended when the result does not already end with it.
///
/// ```
/// use std::path::Path;
/// use tidyfs_core::render_batch_name;
///
/// assert_eq!(render_batch_name("Photo_{n}", Path::new("/p/a.jpg"), 1), "Photo_1.jpg");
/// assert_eq!(render_batch_name("{name}-{n}{ext}", Path::new("/p/a.jpg"), 7), "a-7.jpg");
/// ```
pub fn render_batch_name(pattern: &str, path: &Path, n: usize) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = dotted_extension(path).unwrap_or_default();

    let mut name = pattern
        .replace("{n}", &n.to_string())
        .replace("{name}", &stem)
        .replace("{ext}", &ext);
    if !name.ends_with(&ext) {
        name.push_str(&ext);
    }
    name
}

impl FileManager {
    /// Renames each file in place using `pattern`, numbering from `start_num`.
    ///
    /// The counter advances once per input regardless of the outcome, so the
    /// numbering of later files does not depend on earlier failures.
    pub fn batch_rename(&mut self, files: &[PathBuf], pattern: &str, start_num: usize) -> usize {
        let mut success = 0;
        for (offset, file) in files.iter().enumerate() {
            let new_name = render_batch_name(pattern, file, start_num + offset);
            match self.rename_in_place(file, &new_name) {
                Ok(()) => success += 1,
                Err(e) => tracing::warn!("batch rename skipped {}: {e}", file.display()),
            }
        }
        tracing::info!("batch rename: {success}/{} succeeded", files.len());
        success
    }

    /// Moves each file to `destination/<file name>`.
    pub fn batch_move(&mut self, files: &[PathBuf], destination: &Path) -> usize {
        let success = files
            .iter()
            .filter(|file| {
                into_dir(file, destination)
                    .and_then(|target| self.move_entry(file, &target))
                    .is_ok()
            })
            .count();
        tracing::info!("batch move: {success}/{} succeeded", files.len());
        success
    }

    /// Copies each file to `destination/<file name>`.
    pub fn batch_copy(&mut self, files: &[PathBuf], destination: &Path) -> usize {
        let success = files
            .iter()
            .filter(|file| {
                into_dir(file, destination)
                    .and_then(|target| self.copy(file, &target))
                    .is_ok()
            })
            .count();
        tracing::info!("batch copy: {success}/{} succeeded", files.len());
        success
    }

    /// Deletes each file, through the trash when `use_trash` is set.
    pub fn batch_delete(&mut self, files: &[PathBuf], use_trash: bool) -> usize {
        let success = files
            .iter()
            .filter(|file| self.delete(file, use_trash).is_ok())
            .count();
        tracing::info!("batch delete: {success}/{} succeeded", files.len());
        success
    }

    fn rename_in_place(&mut self, file: &Path, new_name: &str) -> CoreResult<()> {
        if !is_valid_filename(new_name) {
            return Err(CoreError::InvalidName(new_name.to_string()));
        }
        let parent = file
            .parent()
            .ok_or_else(|| CoreError::InvalidName("no parent directory".to_string()))?;
        self.rename(file, &parent.join(new_name))
    }
}

fn into_dir(file: &Path, destination: &Path) -> CoreResult<PathBuf> {
    file.file_name()
        .map(|name| destination.join(name))
        .ok_or_else(|| CoreError::InvalidName(file.display().to_string()))
}
