//! One engine instance per configuration root.
//!
//! [`Engine`] ties together the settings, the annotation store, the file
//! manager (and with it the operation history) and the analyzers. Nothing
//! is process-global: two engines opened on different roots share no state.

use std::path::{Path, PathBuf};

use crate::analyze::{self, DuplicateGroup, LargeFile, Search, SearchQuery, UsageNode};
use crate::config::settings::Settings;
use crate::error::CoreResult;
use crate::fs::hash::Fingerprinter;
use crate::fs::platform::{Opener, Trash};
use crate::fs::walk::WalkOptions;
use crate::manager::FileManager;
use crate::store::MetadataStore;

const SETTINGS_FILE: &str = "config.toml";

/// Returns the default configuration root (`$HOME/.config/tidyfs`).
pub fn default_config_root() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("tidyfs")
}

/// Owns everything scoped to one configuration root.
///
/// The settings are read once at construction. The [`MetadataStore`] reads
/// and writes its documents under the same root, and the [`FileManager`]
/// keeps this engine's [`OperationHistory`](crate::OperationHistory).
/// Analyzer calls are synchronous; run them on a worker when the caller must
/// stay responsive.
pub struct Engine {
    root: PathBuf,
    settings: Settings,
    store: MetadataStore,
    files: FileManager,
    fingerprinter: Fingerprinter,
}

impl Engine {
    /// Opens an engine on `root`, reading `config.toml` from it if present.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let settings = Settings::load_or_default(&root.join(SETTINGS_FILE));
        Self::with_settings(root, settings, FileManager::new())
    }

    /// Opens an engine with explicit settings and OS capabilities.
    pub fn with_capabilities(
        root: impl Into<PathBuf>,
        settings: Settings,
        opener: Box<dyn Opener>,
        trash: Box<dyn Trash>,
    ) -> Self {
        Self::with_settings(
            root.into(),
            settings,
            FileManager::with_capabilities(opener, trash),
        )
    }

    fn with_settings(root: PathBuf, settings: Settings, files: FileManager) -> Self {
        let fingerprinter = Fingerprinter::from_config(&settings.hashing);
        tracing::debug!("engine opened on {}", root.display());
        Self {
            store: MetadataStore::new(&root),
            files: files.with_fingerprinter(fingerprinter.clone()),
            fingerprinter,
            settings,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn files(&self) -> &FileManager {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileManager {
        &mut self.files
    }

    pub fn fingerprinter(&self) -> &Fingerprinter {
        &self.fingerprinter
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions::sorted(self.settings.scan.sorted)
    }

    /// Duplicate groups below `root`. See [`analyze::find_duplicates`].
    pub fn find_duplicates(&self, root: &Path) -> CoreResult<Vec<DuplicateGroup>> {
        analyze::find_duplicates(root, &self.fingerprinter, self.walk_options())
    }

    /// Disk usage tree for `path`. See [`analyze::analyze`].
    pub fn analyze_usage(&self, path: &Path, max_depth: usize) -> UsageNode {
        analyze::analyze(path, max_depth, self.settings.scan.sorted)
    }

    pub fn folder_size(&self, path: &Path) -> u64 {
        analyze::folder_size(path)
    }

    /// Large files below `root`, using the configured threshold when `min_size` is `None`.
    pub fn find_large_files(&self, root: &Path, min_size: Option<u64>) -> Vec<LargeFile> {
        let threshold = min_size.unwrap_or(self.settings.usage.large_file_threshold);
        analyze::find_large_files(root, threshold)
    }

    /// Lazy search below `root`. See [`analyze::search`].
    pub fn search(&self, root: &Path, query: SearchQuery) -> Search {
        analyze::search(
            root,
            query,
            &self.settings.search.text_extensions,
            self.walk_options(),
        )
    }
}
