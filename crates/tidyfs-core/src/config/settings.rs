//! Engine configuration loaded from a TOML file.
//!
//! Every field has a default, so an engine works without a config file.
//! The file lives at `<config root>/config.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::hash::HashAlgorithm;

/// Top-level engine configuration.
///
/// Call [`Settings::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub hashing: HashingConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub usage: UsageConfig,
}

impl Settings {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads `path`, falling back to defaults when the file is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(CoreError::NotFound(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring config {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

/// Content fingerprinting parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    /// Read buffer size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Files larger than this many bytes are never fingerprinted.
    #[serde(default = "default_size_ceiling")]
    pub size_ceiling: u64,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            chunk_size: default_chunk_size(),
            size_ceiling: default_size_ceiling(),
        }
    }
}

/// Traversal behaviour shared by the analyzers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Visit directory entries sorted by file name instead of listing order.
    #[serde(default)]
    pub sorted: bool,
}

/// Search engine parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Extensions (with leading dot) whose content may be searched.
    #[serde(default = "default_text_extensions")]
    pub text_extensions: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            text_extensions: default_text_extensions(),
        }
    }
}

/// Disk usage defaults used by frontends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageConfig {
    #[serde(default = "default_depth")]
    pub default_depth: usize,
    /// Minimum size in bytes reported by the large file finder.
    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold: u64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
            large_file_threshold: default_large_file_threshold(),
        }
    }
}

fn default_chunk_size() -> usize {
    64 * 1024
}

fn default_size_ceiling() -> u64 {
    100 * 1024 * 1024
}

fn default_text_extensions() -> Vec<String> {
    [".txt", ".py", ".js", ".html", ".css", ".md"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_depth() -> usize {
    3
}

fn default_large_file_threshold() -> u64 {
    100 * 1024 * 1024
}
