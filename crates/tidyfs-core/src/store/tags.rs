//! Free-form tags attached to paths.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Mapping of path to its ordered, duplicate-free tags.
///
/// A path whose last tag is removed disappears from the map entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagMap {
    entries: BTreeMap<PathBuf, Vec<String>>,
}

impl TagMap {
    /// Appends `tag` to `path`'s tags unless already present.
    #[must_use]
    pub fn with_tag(self, path: &Path, tag: &str) -> Self {
        let mut entries = self.entries;
        let tags = entries.entry(path.to_path_buf()).or_default();
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
        Self { entries }
    }

    /// Removes `tag` from `path`, dropping the path once it has no tags left.
    #[must_use]
    pub fn without_tag(self, path: &Path, tag: &str) -> Self {
        let mut entries = self.entries;
        if let Some(tags) = entries.get_mut(path) {
            tags.retain(|t| t != tag);
            if tags.is_empty() {
                entries.remove(path);
            }
        }
        Self { entries }
    }

    /// Tags for `path`, empty if it has none.
    pub fn tags_for(&self, path: &Path) -> &[String] {
        self.entries.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// All paths carrying `tag`, in path order.
    pub fn paths_with(&self, tag: &str) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|(_, tags)| tags.iter().any(|t| t == tag))
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Vec<String>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_tag_keeps_order_and_rejects_duplicates() {
        let tags = TagMap::default()
            .with_tag(Path::new("/a"), "work")
            .with_tag(Path::new("/a"), "urgent")
            .with_tag(Path::new("/a"), "work");

        assert_eq!(tags.tags_for(Path::new("/a")), ["work", "urgent"]);
    }

    #[test]
    fn removing_last_tag_drops_path() {
        let tags = TagMap::default()
            .with_tag(Path::new("/a"), "t")
            .without_tag(Path::new("/a"), "t");

        assert!(!tags.contains_path(Path::new("/a")));
        assert!(tags.is_empty());
    }

    #[test]
    fn removing_absent_tag_is_noop() {
        let tags = TagMap::default().with_tag(Path::new("/a"), "t");
        let same = tags.clone().without_tag(Path::new("/a"), "other");
        assert_eq!(tags, same);
    }

    #[test]
    fn paths_with_finds_every_tagged_path() {
        let tags = TagMap::default()
            .with_tag(Path::new("/b"), "photo")
            .with_tag(Path::new("/a"), "photo")
            .with_tag(Path::new("/c"), "doc");

        assert_eq!(
            tags.paths_with("photo"),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert!(tags.paths_with("missing").is_empty());
    }

    #[test]
    fn serializes_as_plain_object() {
        let tags = TagMap::default().with_tag(Path::new("/x/y"), "t");
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"{"/x/y":["t"]}"#);

        let back: TagMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tags);
    }
}
