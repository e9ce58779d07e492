//! Named organisation projects, each pointing at a working directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
    pub created: DateTime<Local>,
    pub last_modified: DateTime<Local>,
}

/// Fields to change on an existing project. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub path: Option<PathBuf>,
}

/// Project registry keyed by name, in creation order.
///
/// Mutations consume `self` and return the updated registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projects {
    entries: Vec<Project>,
}

impl Projects {
    /// Registers a project unless one with the same name exists.
    #[must_use]
    pub fn with_project(self, name: &str, path: &Path, at: DateTime<Local>) -> Self {
        if self.contains(name) {
            return self;
        }
        let mut entries = self.entries;
        entries.push(Project {
            name: name.to_string(),
            path: path.to_path_buf(),
            created: at,
            last_modified: at,
        });
        Self { entries }
    }

    #[must_use]
    pub fn without_project(self, name: &str) -> Self {
        let entries = self
            .entries
            .into_iter()
            .filter(|p| p.name != name)
            .collect();
        Self { entries }
    }

    /// Applies `update` to the project called `name` and stamps `last_modified`.
    ///
    /// Unknown names and renames onto another project's name leave the
    /// registry unchanged.
    #[must_use]
    pub fn updated(self, name: &str, update: &ProjectUpdate, at: DateTime<Local>) -> Self {
        if !self.accepts(name, update) {
            return self;
        }
        let entries = self
            .entries
            .into_iter()
            .map(|p| {
                if p.name != name {
                    return p;
                }
                Project {
                    name: update.name.clone().unwrap_or(p.name),
                    path: update.path.clone().unwrap_or(p.path),
                    last_modified: at,
                    ..p
                }
            })
            .collect();
        Self { entries }
    }

    /// Returns `true` if [`Projects::updated`] would change the registry.
    pub fn accepts(&self, name: &str, update: &ProjectUpdate) -> bool {
        if !self.contains(name) {
            return false;
        }
        match &update.name {
            Some(new_name) => new_name == name || !self.contains(new_name),
            None => true,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Project> {
        self.entries.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> &[Project] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Project> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
