// Cache path utilities.
// Maps structured cache keys onto collision-free filesystem paths under each namespace.

use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::github::{SearchQuery, SortMode};

const SEARCH_NAMESPACE: &str = "search";
const DOCUMENT_NAMESPACE: &str = "documents";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "repolens")
}

/// Get the base cache directory (~/.cache/repolens on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the data directory holding user state that never expires.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the favorites list inside a data directory.
pub fn favorites_path(data_dir: &Path) -> PathBuf {
    data_dir.join("favorites.json")
}

/// Directory for the TUI's log files.
pub fn log_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join("logs")
}

/// Root of the search-results namespace.
pub fn search_dir(root: &Path) -> PathBuf {
    root.join(SEARCH_NAMESPACE)
}

/// Root of the README document namespace.
pub fn documents_dir(root: &Path) -> PathBuf {
    root.join(DOCUMENT_NAMESPACE)
}

/// Key for a cached repository search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    pub language: String,
    pub sort: SortMode,
    pub good_first_issue: bool,
}

impl SearchKey {
    pub fn new(language: impl Into<String>, sort: SortMode, good_first_issue: bool) -> Self {
        Self {
            language: language.into(),
            sort,
            good_first_issue,
        }
    }

    /// Path of this entry relative to the cache root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(SEARCH_NAMESPACE)
            .join(encode_component(&self.language))
            .join(self.sort.as_str())
            .join(format!("{}.json", self.good_first_issue))
    }
}

impl From<&SearchQuery> for SearchKey {
    fn from(query: &SearchQuery) -> Self {
        Self::new(query.language.clone(), query.sort, query.good_first_issue)
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.language,
            self.sort.as_str(),
            self.good_first_issue
        )
    }
}

/// Key for a cached README document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub owner: String,
    pub repo: String,
}

impl DocumentKey {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Path of this entry relative to the cache root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(DOCUMENT_NAMESPACE)
            .join(encode_component(&self.owner))
            .join(format!("{}.json", encode_component(&self.repo)))
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.owner, self.repo)
    }
}

/// Encode a key component as a single, reversible path segment.
/// Anything outside `[A-Za-z0-9+#-]` becomes `%XX` per UTF-8 byte; the empty
/// string becomes `_`, which cannot otherwise appear.
fn encode_component(value: &str) -> String {
    if value.is_empty() {
        return "_".to_string();
    }

    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'+' | b'#' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("rust"), "rust");
        assert_eq!(encode_component("c++"), "c++");
        assert_eq!(encode_component("c#"), "c#");
        assert_eq!(encode_component("with/slash"), "with%2Fslash");
        assert_eq!(encode_component(".."), "%2E%2E");
        assert_eq!(encode_component(""), "_");
        assert_eq!(encode_component("_"), "%5F");
    }

    #[test]
    fn test_flat_keys_that_collide_map_to_distinct_paths() {
        // Both render as "a_b_c" in the flat form.
        let first = DocumentKey::new("a_b", "c");
        let second = DocumentKey::new("a", "b_c");
        assert_eq!(first.to_string(), second.to_string());
        assert_ne!(first.relative_path(), second.relative_path());
    }

    #[test]
    fn test_search_key_layout() {
        let key = SearchKey::new("rust", SortMode::Stars, false);
        assert_eq!(key.to_string(), "rust_stars_false");
        assert!(key.relative_path().ends_with("search/rust/stars/false.json"));
    }

    #[test]
    fn test_document_key_layout() {
        let key = DocumentKey::new("rust-lang", "rust");
        assert_eq!(key.to_string(), "rust-lang_rust");
        assert!(key.relative_path().ends_with("documents/rust-lang/rust.json"));
    }
}
