//! tidyfs core library: UI-agnostic file organisation logic.
//!
//! `tidyfs-core` analyzes and reorganises directory trees: it finds
//! duplicate files by content, aggregates disk usage, searches by name and
//! content, performs batch renames/moves/copies/deletes, and keeps small
//! persisted annotation stores. A frontend owns presentation and calls
//! into an [`Engine`] scoped to one configuration root.
//!
//! # Modules
//!
//! - [`fs`]: [`FileEntry`], traversal, streaming fingerprints, mutation primitives, OS capabilities.
//! - [`analyze`]: duplicate detection, disk usage, search.
//! - [`manager`]: the [`FileManager`] facade, batch operations and [`OperationHistory`].
//! - [`store`]: favorites, recent locations, tags and projects ([`MetadataStore`]).
//! - [`config`]: TOML engine [`Settings`].
//! - [`engine`]: the [`Engine`] tying everything to a configuration root.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod analyze;
pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod manager;
pub mod store;

pub use analyze::{DuplicateGroup, LargeFile, Search, SearchQuery, UsageNode};
pub use config::settings::Settings;
pub use engine::{default_config_root, Engine};
pub use error::{CoreError, CoreResult};
pub use fs::{FileEntry, Fingerprint, Fingerprinter, HashAlgorithm, Opener, Trash, WalkOptions};
pub use manager::{
    render_batch_name, FileManager, HistoryRecord, OperationHistory, OperationKind,
};
pub use store::{FavoriteEntry, MetadataStore, Project, ProjectUpdate, RecentEntry, TagMap};
