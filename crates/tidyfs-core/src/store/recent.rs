//! Recently visited locations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Maximum number of recent locations kept.
pub const RECENT_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub path: PathBuf,
    pub accessed: DateTime<Local>,
}

/// Most-recent-first list without duplicate paths, capped at [`RECENT_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentList {
    entries: Vec<RecentEntry>,
}

impl RecentList {
    /// Puts `path` at the front, removing any older entry for it and
    /// trimming the tail beyond capacity.
    #[must_use]
    pub fn with_visit(self, path: &Path, accessed: DateTime<Local>) -> Self {
        let mut entries = Vec::with_capacity(RECENT_CAPACITY);
        entries.push(RecentEntry {
            path: path.to_path_buf(),
            accessed,
        });
        entries.extend(self.entries.into_iter().filter(|r| r.path != path));
        entries.truncate(RECENT_CAPACITY);
        Self { entries }
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RecentEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
