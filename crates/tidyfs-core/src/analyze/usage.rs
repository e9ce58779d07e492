//! Recursive disk usage aggregation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::fs::walk::{read_directory, walk, WalkOptions};

/// Aggregated size and counts for one directory.
///
/// Totals include everything below the node that the analysis visited.
/// Children keep traversal order; sorting them is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageNode {
    pub path: PathBuf,
    pub size: u64,
    pub file_count: u64,
    pub folder_count: u64,
    pub children: Vec<UsageNode>,
}

impl UsageNode {
    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            ..Self::default()
        }
    }
}

/// Analyzes `path` down to `max_depth` levels.
///
/// With `max_depth == 0` the node is returned with zero totals and no
/// children, without reading the directory. Otherwise each immediate file
/// adds to the node's size and file count, and each immediate subdirectory
/// counts as one folder, is analyzed with `max_depth - 1`, has its totals
/// added in and is appended as a child. A subdirectory at the depth limit
/// therefore counts as a folder but contributes no bytes.
///
/// A directory that cannot be read contributes zero; the failure is logged.
/// Symbolic links are neither counted nor followed.
pub fn analyze(path: &Path, max_depth: usize, sorted: bool) -> UsageNode {
    let mut node = UsageNode::empty(path);
    if max_depth == 0 {
        return node;
    }

    let entries = match read_directory(path, sorted) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("disk usage: cannot read {}: {e}", path.display());
            return node;
        }
    };

    for entry in entries {
        if entry.is_symlink() {
            continue;
        }
        if entry.is_dir() {
            node.folder_count += 1;
            let child = analyze(entry.path(), max_depth - 1, sorted);
            node.size += child.size;
            node.file_count += child.file_count;
            node.folder_count += child.folder_count;
            node.children.push(child);
        } else {
            node.size += entry.size();
            node.file_count += 1;
        }
    }

    node
}

/// Total bytes of every regular file below `path`, with no depth bound.
pub fn folder_size(path: &Path) -> u64 {
    walk(path, WalkOptions::default())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// A file at or above the large-file threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// Every regular file below `root` of at least `min_size` bytes, largest first.
pub fn find_large_files(root: &Path, min_size: u64) -> Vec<LargeFile> {
    let mut files: Vec<LargeFile> = walk(root, WalkOptions::default())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let size = entry.metadata().ok()?.len();
            (size >= min_size).then(|| LargeFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
                size,
            })
        })
        .collect();
    files.sort_by(|a, b| b.size.cmp(&a.size));
    files
}
