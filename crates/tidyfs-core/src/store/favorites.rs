//! Favorite locations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A pinned path with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub path: PathBuf,
    pub name: String,
    pub added: DateTime<Local>,
}

/// Ordered list of favorites holding at most one entry per path.
///
/// Mutations consume `self` and return the updated list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    /// Appends `path` unless it is already present. `name` defaults to the
    /// last path component.
    #[must_use]
    pub fn with_favorite(self, path: &Path, name: Option<&str>, added: DateTime<Local>) -> Self {
        if self.contains(path) {
            return self;
        }
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| display_name(path));
        let mut entries = self.entries;
        entries.push(FavoriteEntry {
            path: path.to_path_buf(),
            name,
            added,
        });
        Self { entries }
    }

    /// Drops the entry for `path`, if any.
    #[must_use]
    pub fn without_favorite(self, path: &Path) -> Self {
        let entries = self
            .entries
            .into_iter()
            .filter(|f| f.path != path)
            .collect();
        Self { entries }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|f| f.path == path)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<FavoriteEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_favorite_uses_file_name_by_default() {
        let favs = Favorites::default().with_favorite(Path::new("/home/u/Projects"), None, Local::now());
        assert_eq!(favs.entries()[0].name, "Projects");
    }

    #[test]
    fn with_favorite_custom_name() {
        let favs = Favorites::default().with_favorite(Path::new("/srv/data"), Some("Data"), Local::now());
        assert_eq!(favs.entries()[0].name, "Data");
    }

    #[test]
    fn root_path_falls_back_to_display() {
        let favs = Favorites::default().with_favorite(Path::new("/"), None, Local::now());
        assert_eq!(favs.entries()[0].name, "/");
    }

    #[test]
    fn duplicate_path_is_ignored() {
        let favs = Favorites::default()
            .with_favorite(Path::new("/a"), Some("first"), Local::now())
            .with_favorite(Path::new("/a"), Some("second"), Local::now());

        assert_eq!(favs.len(), 1);
        assert_eq!(favs.entries()[0].name, "first");
    }

    #[test]
    fn without_favorite_removes_only_that_path() {
        let favs = Favorites::default()
            .with_favorite(Path::new("/a"), None, Local::now())
            .with_favorite(Path::new("/b"), None, Local::now())
            .without_favorite(Path::new("/a"));

        assert!(!favs.contains(Path::new("/a")));
        assert!(favs.contains(Path::new("/b")));
    }

    #[test]
    fn without_absent_favorite_is_noop() {
        let favs = Favorites::default().with_favorite(Path::new("/a"), None, Local::now());
        let same = favs.clone().without_favorite(Path::new("/zzz"));
        assert_eq!(favs, same);
    }
}
