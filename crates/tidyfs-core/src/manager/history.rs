//! Bounded log of successful mutations.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Number of records kept before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 50;

/// The mutation a [`HistoryRecord`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    CreateFolder,
    Rename,
    Move,
    Copy,
    Delete,
    Trash,
}

/// One successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub kind: OperationKind,
    /// The path the operation acted on (the origin for rename/move/copy).
    pub source: PathBuf,
    /// Where the entry ended up, for operations that have a destination.
    pub destination: Option<PathBuf>,
    pub timestamp: DateTime<Local>,
}

/// Append-only FIFO of [`HistoryRecord`]s capped at [`HISTORY_CAPACITY`].
///
/// This is a record of what happened, not an undo journal.
#[derive(Debug, Clone)]
pub struct OperationHistory {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl Default for OperationHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl OperationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that keeps at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a record stamped with the current time, evicting the oldest when full.
    pub fn record(&mut self, kind: OperationKind, source: &Path, destination: Option<&Path>) {
        self.push(HistoryRecord {
            kind,
            source: source.to_path_buf(),
            destination: destination.map(Path::to_path_buf),
            timestamp: Local::now(),
        });
    }

    pub fn push(&mut self, record: HistoryRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Snapshot in insertion order (oldest first).
    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.iter().cloned().collect()
    }

    /// Iterates newest first, the usual display order.
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
