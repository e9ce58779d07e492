//! Content-based duplicate detection.
//!
//! Files are fingerprinted as they are encountered. The first file seen
//! with a given fingerprint is parked as a candidate; the second one opens
//! a [`DuplicateGroup`] with both paths and any later match is appended.
//!
//! "First seen" follows traversal order, which is raw directory-listing
//! order unless sorting is requested through [`WalkOptions::sorted`]. With
//! sorting off, which path leads a group can differ between platforms.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CoreResult;
use crate::fs::hash::{Fingerprint, Fingerprinter};
use crate::fs::walk::{ensure_dir, walk, WalkOptions};

/// Two or more files with identical content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub fingerprint: Fingerprint,
    /// File size in bytes (shared by all files in the group).
    pub size: u64,
    /// Always 2+ paths; the first is the earliest one observed.
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Bytes that could be reclaimed by keeping a single copy.
    pub fn wasted_bytes(&self) -> u64 {
        self.size * (self.paths.len() as u64).saturating_sub(1)
    }
}

/// Total reclaimable bytes across `groups`.
pub fn total_wasted(groups: &[DuplicateGroup]) -> u64 {
    groups.iter().map(DuplicateGroup::wasted_bytes).sum()
}

/// Finds groups of identical files below `root`.
///
/// Files above the fingerprinter's size ceiling and files that cannot be
/// read are skipped. Groups are returned in the order they were formed.
///
/// # Errors
///
/// - [`crate::CoreError::NotFound`]: the root does not exist.
/// - [`crate::CoreError::NotADirectory`]: the root is not a directory.
pub fn find_duplicates(
    root: &Path,
    fingerprinter: &Fingerprinter,
    options: WalkOptions,
) -> CoreResult<Vec<DuplicateGroup>> {
    ensure_dir(root)?;

    let mut candidates: HashMap<Fingerprint, (PathBuf, u64)> = HashMap::new();
    let mut group_index: HashMap<Fingerprint, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for entry in walk(root, options) {
        if !entry.file_type().is_file() {
            continue;
        }
        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::debug!("skipping {}: {e}", entry.path().display());
                continue;
            }
        };
        if !fingerprinter.is_within_ceiling(size) {
            tracing::debug!("skipping {} above size ceiling", entry.path().display());
            continue;
        }

        let fingerprint = fingerprinter.fingerprint(entry.path());
        if fingerprint.is_empty() {
            continue;
        }

        let path = entry.into_path();
        if let Some(&idx) = group_index.get(&fingerprint) {
            groups[idx].paths.push(path);
        } else if let Some((first, first_size)) = candidates.remove(&fingerprint) {
            group_index.insert(fingerprint.clone(), groups.len());
            groups.push(DuplicateGroup {
                fingerprint,
                size: first_size,
                paths: vec![first, path],
            });
        } else {
            candidates.insert(fingerprint, (path, size));
        }
    }

    tracing::info!(
        "duplicate scan of {}: {} groups",
        root.display(),
        groups.len()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::fs::hash::HashAlgorithm;
    use std::fs;
    use tempfile::TempDir;

    fn sorted() -> WalkOptions {
        WalkOptions::sorted(true)
    }

    #[test]
    fn identical_files_form_one_group() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "same").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("b.txt"), "same").unwrap();
        fs::write(tmp.path().join("sub").join("c.txt"), "same").unwrap();
        fs::write(tmp.path().join("d.txt"), "different").unwrap();
        fs::write(tmp.path().join("e.txt"), "unique").unwrap();

        let groups = find_duplicates(tmp.path(), &Fingerprinter::default(), sorted()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].paths.len(), 3);
        assert_eq!(groups[0].size, 4);
        assert!(!groups[0]
            .paths
            .iter()
            .any(|p| p.ends_with("d.txt") || p.ends_with("e.txt")));
    }

    #[test]
    fn first_observed_path_leads_group() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "dup").unwrap();
        fs::write(tmp.path().join("b.txt"), "dup").unwrap();

        let groups = find_duplicates(tmp.path(), &Fingerprinter::default(), sorted()).unwrap();

        assert_eq!(
            groups[0].paths,
            vec![tmp.path().join("a.txt"), tmp.path().join("b.txt")]
        );
    }

    #[test]
    fn groups_by_content_not_name() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("x")).unwrap();
        fs::write(tmp.path().join("report.txt"), "v1").unwrap();
        fs::write(tmp.path().join("x").join("report.txt"), "v2").unwrap();

        let groups = find_duplicates(tmp.path(), &Fingerprinter::default(), sorted()).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn zero_byte_files_group_together() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("e1"), "").unwrap();
        fs::write(tmp.path().join("e2"), "").unwrap();

        let groups = find_duplicates(tmp.path(), &Fingerprinter::default(), sorted()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].wasted_bytes(), 0);
    }

    #[test]
    fn files_above_ceiling_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("big1"), "0123456789").unwrap();
        fs::write(tmp.path().join("big2"), "0123456789").unwrap();
        fs::write(tmp.path().join("s1"), "ab").unwrap();
        fs::write(tmp.path().join("s2"), "ab").unwrap();

        let fp = Fingerprinter::new(HashAlgorithm::Sha256, 4096, 5);
        let groups = find_duplicates(tmp.path(), &fp, sorted()).unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups[0].paths[0].ends_with("s1"));
    }

    #[test]
    fn multiple_groups_and_waste() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a1"), "aaaa").unwrap();
        fs::write(tmp.path().join("a2"), "aaaa").unwrap();
        fs::write(tmp.path().join("a3"), "aaaa").unwrap();
        fs::write(tmp.path().join("b1"), "bb").unwrap();
        fs::write(tmp.path().join("b2"), "bb").unwrap();

        let groups = find_duplicates(tmp.path(), &Fingerprinter::default(), sorted()).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(total_wasted(&groups), 4 * 2 + 2);
    }

    #[test]
    fn missing_root_is_not_found() {
        let result = find_duplicates(
            Path::new("/nonexistent/root"),
            &Fingerprinter::default(),
            sorted(),
        );
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, "x").unwrap();

        let result = find_duplicates(&file, &Fingerprinter::default(), sorted());
        assert!(matches!(result.unwrap_err(), CoreError::NotADirectory(_)));
    }
}
