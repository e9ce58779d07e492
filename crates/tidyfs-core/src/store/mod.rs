//! Persisted annotations: favorites, recent locations, tags and projects.
//!
//! Each kind lives in its own JSON document under the configuration root.
//! Every call reads the whole document, applies one change and writes it
//! back, so state survives restarts without being held in memory. The
//! store assumes a single writer: concurrent writers to the same document
//! can lose updates.

pub mod document;
pub mod favorites;
pub mod projects;
pub mod recent;
pub mod tags;

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{CoreError, CoreResult};

pub use document::{load_document, load_document_strict, save_document};
pub use favorites::{FavoriteEntry, Favorites};
pub use projects::{Project, ProjectUpdate, Projects};
pub use recent::{RecentEntry, RecentList, RECENT_CAPACITY};
pub use tags::TagMap;

const FAVORITES_FILE: &str = "favorites.json";
const RECENT_FILE: &str = "recent.json";
const TAGS_FILE: &str = "tags.json";
const PROJECTS_FILE: &str = "projects.json";

/// Annotation store scoped to one configuration root.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    root: PathBuf,
}

impl MetadataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    // --- favorites ---

    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.load_favorites().into_entries()
    }

    pub fn is_favorite(&self, path: &Path) -> bool {
        self.load_favorites().contains(path)
    }

    /// Adds `path` to the favorites; a path that is already present is left untouched.
    pub fn add_favorite(&self, path: &Path, name: Option<&str>) -> CoreResult<()> {
        let favorites = self.load_favorites();
        if favorites.contains(path) {
            return Ok(());
        }
        let favorites = favorites.with_favorite(path, name, Local::now());
        save_document(&self.document(FAVORITES_FILE), &favorites)
    }

    pub fn remove_favorite(&self, path: &Path) -> CoreResult<()> {
        let favorites = self.load_favorites().without_favorite(path);
        save_document(&self.document(FAVORITES_FILE), &favorites)
    }

    fn load_favorites(&self) -> Favorites {
        load_document(&self.document(FAVORITES_FILE))
    }

    // --- recent ---

    /// Recent locations, most recent first.
    pub fn recent(&self) -> Vec<RecentEntry> {
        self.load_recent().into_entries()
    }

    pub fn add_recent(&self, path: &Path) -> CoreResult<()> {
        let recent = self.load_recent().with_visit(path, Local::now());
        save_document(&self.document(RECENT_FILE), &recent)
    }

    pub fn clear_recent(&self) -> CoreResult<()> {
        save_document(&self.document(RECENT_FILE), &RecentList::default())
    }

    fn load_recent(&self) -> RecentList {
        load_document(&self.document(RECENT_FILE))
    }

    // --- tags ---

    pub fn all_tags(&self) -> TagMap {
        load_document(&self.document(TAGS_FILE))
    }

    pub fn tags_for(&self, path: &Path) -> Vec<String> {
        self.all_tags().tags_for(path).to_vec()
    }

    pub fn add_tag(&self, path: &Path, tag: &str) -> CoreResult<()> {
        let tags = self.all_tags().with_tag(path, tag);
        save_document(&self.document(TAGS_FILE), &tags)
    }

    pub fn remove_tag(&self, path: &Path, tag: &str) -> CoreResult<()> {
        let tags = self.all_tags().without_tag(path, tag);
        save_document(&self.document(TAGS_FILE), &tags)
    }

    /// Every path whose tag set contains `tag`.
    pub fn search_by_tag(&self, tag: &str) -> Vec<PathBuf> {
        self.all_tags().paths_with(tag)
    }

    // --- projects ---

    pub fn projects(&self) -> Vec<Project> {
        self.load_projects().into_entries()
    }

    pub fn project(&self, name: &str) -> Option<Project> {
        self.load_projects().get(name).cloned()
    }

    /// Registers `name` for `path` and returns the stored project. An
    /// existing project with that name is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidName`] if `name` is blank.
    /// - [`CoreError::Io`] if the document cannot be written.
    pub fn create_project(&self, name: &str, path: &Path) -> CoreResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidName(String::new()));
        }
        let projects = self.load_projects();
        if let Some(existing) = projects.get(name) {
            return Ok(existing.clone());
        }
        let projects = projects.with_project(name, path, Local::now());
        save_document(&self.document(PROJECTS_FILE), &projects)?;
        projects
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::InvalidName(name.to_string()))
    }

    /// Applies `update` to the project called `name`.
    ///
    /// Returns `false` without writing when there is no such project or the
    /// new name is taken.
    pub fn update_project(&self, name: &str, update: &ProjectUpdate) -> CoreResult<bool> {
        let projects = self.load_projects();
        if !projects.accepts(name, update) {
            return Ok(false);
        }
        let projects = projects.updated(name, update, Local::now());
        save_document(&self.document(PROJECTS_FILE), &projects)?;
        Ok(true)
    }

    pub fn delete_project(&self, name: &str) -> CoreResult<()> {
        let projects = self.load_projects().without_project(name);
        save_document(&self.document(PROJECTS_FILE), &projects)
    }

    fn load_projects(&self) -> Projects {
        load_document(&self.document(PROJECTS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn favorites_survive_a_new_store_instance() {
        let tmp = TempDir::new().unwrap();
        MetadataStore::new(tmp.path())
            .add_favorite(Path::new("/home/u/music"), None)
            .unwrap();

        let reopened = MetadataStore::new(tmp.path());
        let favorites = reopened.favorites();

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "music");
        assert!(reopened.is_favorite(Path::new("/home/u/music")));
    }

    #[test]
    fn adding_favorite_twice_keeps_one_entry() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());

        store.add_favorite(Path::new("/a"), None).unwrap();
        store.add_favorite(Path::new("/a"), Some("again")).unwrap();

        assert_eq!(store.favorites().len(), 1);
    }

    #[test]
    fn removing_absent_favorite_is_noop() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());
        store.add_favorite(Path::new("/a"), None).unwrap();

        store.remove_favorite(Path::new("/not-there")).unwrap();

        assert_eq!(store.favorites().len(), 1);
    }

    #[test]
    fn favorites_document_layout() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());
        store.add_favorite(Path::new("/a"), Some("A")).unwrap();

        let raw = fs::read_to_string(tmp.path().join("favorites.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["path"], "/a");
        assert_eq!(first["name"], "A");
        assert!(first["added"].is_string());
    }

    #[test]
    fn projects_persist_and_update() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());

        let created = store
            .create_project("photos", Path::new("/home/u/Pictures"))
            .unwrap();
        let update = ProjectUpdate {
            name: Some("archive".to_string()),
            ..ProjectUpdate::default()
        };
        assert!(store.update_project("photos", &update).unwrap());

        let reopened = MetadataStore::new(tmp.path());
        assert!(reopened.project("photos").is_none());
        let renamed = reopened.project("archive").unwrap();
        assert_eq!(renamed.path, PathBuf::from("/home/u/Pictures"));
        assert_eq!(renamed.created, created.created);
        assert!(renamed.last_modified >= created.last_modified);
    }

    #[test]
    fn creating_existing_project_returns_it_unchanged() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());

        let first = store.create_project("p", Path::new("/one")).unwrap();
        let second = store.create_project("p", Path::new("/two")).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.projects().len(), 1);
    }

    #[test]
    fn blank_project_name_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());

        let result = store.create_project("  ", Path::new("/x"));

        assert!(matches!(result.unwrap_err(), CoreError::InvalidName(_)));
        assert!(!tmp.path().join("projects.json").exists());
    }

    #[test]
    fn update_and_delete_of_missing_project() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());
        store.create_project("keep", Path::new("/k")).unwrap();

        assert!(!store
            .update_project("ghost", &ProjectUpdate::default())
            .unwrap());
        store.delete_project("ghost").unwrap();
        store.delete_project("keep").unwrap();

        assert!(store.projects().is_empty());
    }

    #[test]
    fn projects_document_layout() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());
        store.create_project("p", Path::new("/p")).unwrap();

        let raw = fs::read_to_string(tmp.path().join("projects.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["name"], "p");
        assert_eq!(first["path"], "/p");
        assert!(first["created"].is_string());
        assert!(first["last_modified"].is_string());
    }

    #[test]
    fn recent_moves_revisits_to_front_and_caps() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());

        for i in 0..25 {
            store.add_recent(Path::new(&format!("/d{i}"))).unwrap();
        }
        store.add_recent(Path::new("/d10")).unwrap();

        let recent = store.recent();
        assert_eq!(recent.len(), RECENT_CAPACITY);
        assert_eq!(recent[0].path, PathBuf::from("/d10"));
        assert_eq!(
            recent.iter().filter(|r| r.path == Path::new("/d10")).count(),
            1
        );
    }

    #[test]
    fn clear_recent_empties_list() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());
        store.add_recent(Path::new("/x")).unwrap();

        store.clear_recent().unwrap();

        assert!(store.recent().is_empty());
    }

    #[test]
    fn tag_then_untag_removes_path() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());

        store.add_tag(Path::new("/p"), "keep").unwrap();
        store.remove_tag(Path::new("/p"), "keep").unwrap();

        assert!(!store.all_tags().contains_path(Path::new("/p")));
        assert!(store.tags_for(Path::new("/p")).is_empty());
    }

    #[test]
    fn search_by_tag_returns_all_matches() {
        let tmp = TempDir::new().unwrap();
        let store = MetadataStore::new(tmp.path());
        store.add_tag(Path::new("/a"), "x").unwrap();
        store.add_tag(Path::new("/b"), "x").unwrap();
        store.add_tag(Path::new("/b"), "y").unwrap();

        assert_eq!(
            store.search_by_tag("x"),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert_eq!(store.tags_for(Path::new("/b")), vec!["x", "y"]);
    }

    #[test]
    fn corrupt_documents_read_as_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("favorites.json"), "{oops").unwrap();
        fs::write(tmp.path().join("tags.json"), "[]").unwrap();
        let store = MetadataStore::new(tmp.path());

        assert!(store.favorites().is_empty());
        assert!(store.all_tags().is_empty());

        store.add_tag(Path::new("/a"), "fresh").unwrap();
        assert_eq!(store.tags_for(Path::new("/a")), vec!["fresh"]);
    }

    #[test]
    fn missing_root_is_created_on_first_write() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("not").join("yet");
        let store = MetadataStore::new(&root);

        assert!(store.recent().is_empty());
        store.add_recent(Path::new("/x")).unwrap();

        assert!(root.join("recent.json").exists());
    }
}
