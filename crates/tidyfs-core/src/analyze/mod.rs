//! Read-only analyzers built on [`crate::fs::walk`].
//!
//! - [`duplicates`]: content-based duplicate groups.
//! - [`usage`]: depth-bounded disk usage trees, folder sizes, large files.
//! - [`search`]: lazy name/content search with extension filtering.
//!
//! All of them run to completion on the calling thread. Frontends that need
//! to stay responsive should call them from a worker.

pub mod duplicates;
pub mod search;
pub mod usage;

pub use duplicates::{find_duplicates, total_wasted, DuplicateGroup};
pub use search::{normalize_extension, search, Search, SearchQuery};
pub use usage::{analyze, find_large_files, folder_size, LargeFile, UsageNode};
