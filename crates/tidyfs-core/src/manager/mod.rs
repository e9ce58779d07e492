//! The file manager facade.
//!
//! [`FileManager`] wraps the primitives in [`crate::fs::ops`] and the OS
//! capabilities in [`crate::fs::platform`]. Every mutation that succeeds is
//! appended to its [`OperationHistory`]; failures are logged and returned
//! to the caller but never recorded. Batch variants live in [`batch`].

pub mod batch;
pub mod history;

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::fs::hash::Fingerprinter;
use crate::fs::ops;
use crate::fs::platform::{Opener, SystemOpener, SystemTrash, Trash};

pub use batch::render_batch_name;
pub use history::{HistoryRecord, OperationHistory, OperationKind, HISTORY_CAPACITY};

/// Basic create/rename/move/copy/delete/open operations with history tracking.
pub struct FileManager {
    history: OperationHistory,
    opener: Box<dyn Opener>,
    trash: Box<dyn Trash>,
    fingerprinter: Fingerprinter,
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FileManager {
    /// A manager using the platform's opener and trash.
    pub fn new() -> Self {
        Self::with_capabilities(Box::new(SystemOpener), Box::new(SystemTrash))
    }

    pub fn with_capabilities(opener: Box<dyn Opener>, trash: Box<dyn Trash>) -> Self {
        Self {
            history: OperationHistory::new(),
            opener,
            trash,
            fingerprinter: Fingerprinter::default(),
        }
    }

    /// Replaces the fingerprinter used by [`FileManager::file_info`].
    #[must_use]
    pub fn with_fingerprinter(self, fingerprinter: Fingerprinter) -> Self {
        Self {
            fingerprinter,
            ..self
        }
    }

    pub fn history(&self) -> &OperationHistory {
        &self.history
    }

    /// Creates `path` and any missing parents. Fails if `path` already exists.
    pub fn create_folder(&mut self, path: &Path) -> CoreResult<()> {
        let result = ops::create_folder(path);
        self.track(result, OperationKind::CreateFolder, path, None)
    }

    /// Renames `old` to the full path `new`.
    pub fn rename(&mut self, old: &Path, new: &Path) -> CoreResult<()> {
        let result = ops::rename_path(old, new);
        self.track(result, OperationKind::Rename, old, Some(new))
    }

    /// Moves `src` to `dest`, falling back to copy + delete across devices.
    pub fn move_entry(&mut self, src: &Path, dest: &Path) -> CoreResult<()> {
        let result = ops::move_path(src, dest);
        self.track(result, OperationKind::Move, src, Some(dest))
    }

    /// Copies a file (keeping its metadata) or a whole directory tree.
    pub fn copy(&mut self, src: &Path, dest: &Path) -> CoreResult<()> {
        let result = ops::copy_path(src, dest);
        self.track(result, OperationKind::Copy, src, Some(dest))
    }

    /// Deletes `path`, through the trash when `use_trash` is set, permanently otherwise.
    pub fn delete(&mut self, path: &Path, use_trash: bool) -> CoreResult<()> {
        if use_trash {
            let result = self.trash.trash(path);
            self.track(result, OperationKind::Trash, path, None)
        } else {
            let result = ops::delete_path(path);
            self.track(result, OperationKind::Delete, path, None)
        }
    }

    /// Opens `path` with the default application. Not recorded in history.
    pub fn open_file(&self, path: &Path) -> CoreResult<()> {
        self.opener.open(path).inspect_err(|e| {
            tracing::warn!("open {} failed: {e}", path.display());
        })
    }

    /// Returns metadata for `path`, fingerprinted when it is a file within the size ceiling.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] when the path cannot be stat'ed.
    pub fn file_info(&self, path: &Path) -> CoreResult<FileEntry> {
        let metadata = std::fs::metadata(path).map_err(|e| CoreError::from_io(e, path))?;
        let entry = FileEntry::new(path.to_path_buf(), &metadata);
        if metadata.is_file() && self.fingerprinter.is_within_ceiling(metadata.len()) {
            let fingerprint = self.fingerprinter.fingerprint(path);
            return Ok(entry.with_fingerprint(fingerprint));
        }
        Ok(entry)
    }

    fn track(
        &mut self,
        result: CoreResult<()>,
        kind: OperationKind,
        source: &Path,
        destination: Option<&Path>,
    ) -> CoreResult<()> {
        match &result {
            Ok(()) => {
                tracing::info!(?kind, "{}", source.display());
                self.history.record(kind, source, destination);
            }
            Err(e) => tracing::warn!(?kind, "{} failed: {e}", source.display()),
        }
        result
    }
}


#[cfg(test)]
mod tests {
    use super::testing::manager;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn successful_create_is_recorded() {
        let tmp = TempDir::new().unwrap();
        let (mut fm, _) = manager();
        let dir = tmp.path().join("new");

        fm.create_folder(&dir).unwrap();

        assert!(dir.is_dir());
        let records = fm.history().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, OperationKind::CreateFolder);
        assert_eq!(records[0].source, dir);
    }

    #[test]
    fn failed_create_is_not_recorded() {
        let tmp = TempDir::new().unwrap();
        let (mut fm, _) = manager();

        let result = fm.create_folder(tmp.path());

        assert!(matches!(result.unwrap_err(), CoreError::AlreadyExists(_)));
        assert!(fm.history().is_empty());
    }

    #[test]
    fn rename_records_both_paths() {
        let tmp = TempDir::new().unwrap();
        let (mut fm, _) = manager();
        let old = tmp.path().join("a.txt");
        let new = tmp.path().join("b.txt");
        fs::write(&old, "x").unwrap();

        fm.rename(&old, &new).unwrap();

        let record = &fm.history().records()[0];
        assert_eq!(record.kind, OperationKind::Rename);
        assert_eq!(record.source, old);
        assert_eq!(record.destination.as_deref(), Some(new.as_path()));
    }

    #[test]
    fn move_and_copy_are_recorded() {
        let tmp = TempDir::new().unwrap();
        let (mut fm, _) = manager();
        let src = tmp.path().join("a.txt");
        fs::write(&src, "x").unwrap();

        fm.copy(&src, &tmp.path().join("copy.txt")).unwrap();
        fm.move_entry(&src, &tmp.path().join("moved.txt")).unwrap();

        let kinds: Vec<OperationKind> = fm.history().records().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![OperationKind::Copy, OperationKind::Move]);
        assert!(!src.exists());
    }

    #[test]
    fn copy_or_move_into_own_subtree_fails_unrecorded() {
        let tmp = TempDir::new().unwrap();
        let (mut fm, _) = manager();
        let dir = tmp.path().join("a");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("keep.txt"), "x").unwrap();

        assert!(fm.copy(&dir, &dir.join("b")).is_err());
        assert!(fm.move_entry(&dir, &dir.join("b")).is_err());

        assert!(!dir.join("b").exists());
        assert!(dir.join("keep.txt").exists());
        assert!(fm.history().is_empty());
    }

    #[test]
    fn delete_uses_trash_by_request() {
        let tmp = TempDir::new().unwrap();
        let (mut fm, platform) = manager();
        let file = tmp.path().join("junk.txt");
        fs::write(&file, "x").unwrap();

        fm.delete(&file, true).unwrap();

        assert_eq!(*platform.trashed.lock().unwrap(), vec![file.clone()]);
        assert_eq!(fm.history().records()[0].kind, OperationKind::Trash);
    }

    #[test]
    fn permanent_delete_removes_tree() {
        let tmp = TempDir::new().unwrap();
        let (mut fm, platform) = manager();
        let dir = tmp.path().join("tree");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner").join("f"), "x").unwrap();

        fm.delete(&dir, false).unwrap();

        assert!(!dir.exists());
        assert!(platform.trashed.lock().unwrap().is_empty());
        assert_eq!(fm.history().records()[0].kind, OperationKind::Delete);
    }

    #[test]
    fn open_file_delegates_and_is_not_recorded() {
        let (fm, platform) = manager();

        fm.open_file(Path::new("/some/doc.pdf")).unwrap();

        assert_eq!(
            *platform.opened.lock().unwrap(),
            vec![std::path::PathBuf::from("/some/doc.pdf")]
        );
        assert!(fm.history().is_empty());
    }

    #[test]
    fn file_info_includes_fingerprint_for_small_files() {
        let tmp = TempDir::new().unwrap();
        let (fm, _) = manager();
        let file = tmp.path().join("photo.jpg");
        fs::write(&file, "pixels").unwrap();

        let info = fm.file_info(&file).unwrap();

        assert_eq!(info.extension(), Some(".jpg"));
        assert_eq!(info.size(), 6);
        assert!(info.fingerprint().is_some_and(|fp| !fp.is_empty()));
    }

    #[test]
    fn file_info_skips_fingerprint_above_ceiling() {
        use crate::fs::hash::{Fingerprinter, HashAlgorithm};

        let tmp = TempDir::new().unwrap();
        let (fm, _) = manager();
        let fm = fm.with_fingerprinter(Fingerprinter::new(HashAlgorithm::Sha256, 16, 4));
        let file = tmp.path().join("big.bin");
        fs::write(&file, "more than four bytes").unwrap();

        let info = fm.file_info(&file).unwrap();
        assert!(info.fingerprint().is_none());
    }

    #[test]
    fn file_info_missing_path_is_not_found() {
        let (fm, _) = manager();
        let result = fm.file_info(Path::new("/nonexistent/thing"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }
}
