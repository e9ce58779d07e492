//! Name and content search over a directory tree.

use std::path::{Path, PathBuf};

use crate::fs::entry::dotted_extension;
use crate::fs::walk::{walk, Walk, WalkOptions};

/// What to look for and where.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub text: String,
    pub case_sensitive: bool,
    /// Also look inside text-like files when the name does not match.
    pub search_content: bool,
    /// Only consider entries with one of these extensions. `None` or an
    /// empty list allows all.
    pub extensions: Option<Vec<String>>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn case_sensitive(self, case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            ..self
        }
    }

    #[must_use]
    pub fn search_content(self, search_content: bool) -> Self {
        Self {
            search_content,
            ..self
        }
    }

    #[must_use]
    pub fn extensions<I, S>(self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .collect();
        Self {
            extensions: (!extensions.is_empty()).then_some(extensions),
            ..self
        }
    }
}

/// Lower-cases `ext` and makes sure it starts with a dot.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Lazy search results in traversal order.
///
/// Each matching path is yielded once. Content is only read for files whose
/// extension is in the text whitelist, decoded leniently; read failures are
/// treated as non-matches.
pub struct Search {
    walk: Walk,
    needle: String,
    case_sensitive: bool,
    search_content: bool,
    extensions: Option<Vec<String>>,
    text_extensions: Vec<String>,
}

/// Starts a search below `root` using `text_extensions` as the content whitelist.
pub fn search(
    root: &Path,
    query: SearchQuery,
    text_extensions: &[String],
    options: WalkOptions,
) -> Search {
    let needle = if query.case_sensitive {
        query.text
    } else {
        query.text.to_lowercase()
    };
    Search {
        walk: walk(root, options),
        needle,
        case_sensitive: query.case_sensitive,
        search_content: query.search_content,
        extensions: query
            .extensions
            .filter(|exts| !exts.is_empty())
            .map(|exts| exts.iter().map(|e| normalize_extension(e)).collect()),
        text_extensions: text_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect(),
    }
}

impl Search {
    fn fold_case(&self, s: &str) -> String {
        if self.case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    }

    fn content_matches(&self, path: &Path) -> bool {
        match std::fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                self.fold_case(&text).contains(&self.needle)
            }
            Err(e) => {
                tracing::debug!("content search skipped {}: {e}", path.display());
                false
            }
        }
    }
}

impl Iterator for Search {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = self.walk.next()?;
            let extension = dotted_extension(entry.path())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();

            if let Some(allowed) = &self.extensions {
                if !allowed.contains(&extension) {
                    continue;
                }
            }

            let name = self.fold_case(&entry.file_name().to_string_lossy());
            if name.contains(&self.needle) {
                return Some(entry.into_path());
            }

            if self.search_content
                && entry.file_type().is_file()
                && self.text_extensions.contains(&extension)
                && self.content_matches(entry.path())
            {
                return Some(entry.into_path());
            }
        }
    }
}
