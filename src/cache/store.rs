// Cache store for reading and writing cached data.
// Handles JSON serialization, TTL checking, eviction, and atomic filesystem writes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::Result;

use super::paths::{self, DocumentKey, SearchKey};

/// Entries older than this are treated as absent: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3_600_000);

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Wrapper for cached data with its write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached, in epoch milliseconds.
    pub timestamp: i64,
}

impl<T> CachedEntry<T> {
    /// Create a new entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: now_millis(),
        }
    }

    /// Check whether this entry has outlived the TTL at time `now`.
    pub fn is_expired_at(&self, now: i64, ttl: Duration) -> bool {
        now.saturating_sub(self.timestamp) > ttl.as_millis() as i64
    }

    /// Check whether this entry has outlived the TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(now_millis(), ttl)
    }
}

/// Just the timestamp of an entry, for sweeps that don't care about the payload.
#[derive(Debug, Deserialize)]
struct EntryStamp {
    timestamp: i64,
}

/// Read a cached entry from a file.
pub fn read_entry<T: DeserializeOwned>(path: &Path) -> Result<Option<CachedEntry<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let entry: CachedEntry<T> = serde_json::from_str(&contents)?;
    Ok(Some(entry))
}

/// Write a cached entry as JSON.
pub fn write_entry<T: Serialize>(path: &Path, entry: &CachedEntry<T>) -> Result<()> {
    let json = serde_json::to_string(entry)?;
    write_atomic(path, &json)
}

/// Write text to a file atomically via a temp file, creating parent directories.
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Delete a cached file.
pub fn delete(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Collect every `.json` file below `dir`.
fn collect_entries(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_entries(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

/// TTL cache over a directory with a search namespace and a document namespace.
#[derive(Debug, Clone)]
pub struct Cache {
    root: PathBuf,
    ttl: Duration,
}

impl Cache {
    /// Create a cache rooted at `root` with the default TTL.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Override the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Filesystem path for a search key.
    pub fn search_path(&self, key: &SearchKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Filesystem path for a document key.
    pub fn document_path(&self, key: &DocumentKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Store search results under `key`.
    pub fn set<T: Serialize>(&self, key: &SearchKey, data: &T) -> Result<()> {
        write_entry(&self.search_path(key), &CachedEntry::new(data))
    }

    /// Get search results if present and fresh. Expired entries are removed.
    pub fn get<T: DeserializeOwned>(&self, key: &SearchKey) -> Option<T> {
        self.read_fresh(&self.search_path(key))
    }

    /// Store a document under `key`, sweeping expired documents first.
    pub fn set_document<T: Serialize>(&self, key: &DocumentKey, data: &T) -> Result<()> {
        self.cleanup();
        write_entry(&self.document_path(key), &CachedEntry::new(data))
    }

    /// Get a document if present and fresh. Expired entries are removed.
    pub fn get_document<T: DeserializeOwned>(&self, key: &DocumentKey) -> Option<T> {
        self.read_fresh(&self.document_path(key))
    }

    /// Remove expired or unreadable entries from the document namespace.
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let mut files = Vec::new();
        if let Err(e) = collect_entries(&paths::documents_dir(&self.root), &mut files) {
            tracing::error!(error = %e, "Cache cleanup failed");
            return 0;
        }

        let now = now_millis();
        let ttl_millis = self.ttl.as_millis() as i64;
        let mut removed = 0;
        for path in files {
            let stale = match fs::read_to_string(&path)
                .ok()
                .and_then(|text| serde_json::from_str::<EntryStamp>(&text).ok())
            {
                Some(stamp) => now.saturating_sub(stamp.timestamp) > ttl_millis,
                None => true,
            };
            if stale {
                match delete(&path) {
                    Ok(()) => removed += 1,
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to evict cache entry"),
                }
            }
        }

        if removed > 0 {
            tracing::debug!(removed, "Swept expired documents");
        }
        removed
    }

    /// Delete every cached entry in both namespaces.
    pub fn clear(&self) -> Result<()> {
        for dir in [paths::search_dir(&self.root), paths::documents_dir(&self.root)] {
            if dir.exists() {
                fs::remove_dir_all(&dir)?;
            }
        }
        Ok(())
    }

    fn read_fresh<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        match read_entry::<T>(path) {
            Ok(Some(entry)) if !entry.is_expired(self.ttl) => Some(entry.data),
            Ok(Some(_)) => {
                self.evict(path);
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cache retrieval failed");
                self.evict(path);
                None
            }
        }
    }

    fn evict(&self, path: &Path) {
        if let Err(e) = delete(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to evict cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::SortMode;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn sample() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    /// Backdate an entry on disk by rewriting its timestamp.
    fn backdate(path: &Path, millis: i64) {
        let mut entry: CachedEntry<serde_json::Value> = read_entry(path).unwrap().unwrap();
        entry.timestamp -= millis;
        write_entry(path, &entry).unwrap();
    }

    #[test]
    fn test_set_then_get_within_ttl() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());
        let key = SearchKey::new("rust", SortMode::Stars, false);

        cache.set(&key, &sample()).unwrap();

        assert_eq!(cache.get::<TestData>(&key), Some(sample()));
    }

    #[test]
    fn test_expired_entry_is_absent_and_removed() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());
        let key = SearchKey::new("rust", SortMode::Stars, false);

        cache.set(&key, &sample()).unwrap();
        let path = cache.search_path(&key);
        backdate(&path, DEFAULT_TTL.as_millis() as i64 + 1);

        assert_eq!(cache.get::<TestData>(&key), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_entry_at_exact_ttl_is_fresh() {
        let entry = CachedEntry {
            data: "x",
            timestamp: 1_000,
        };
        let ttl = Duration::from_millis(500);
        assert!(!entry.is_expired_at(1_500, ttl));
        assert!(entry.is_expired_at(1_501, ttl));
    }

    #[test]
    fn test_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());
        let key = SearchKey::new("go", SortMode::Forks, true);

        assert_eq!(cache.get::<TestData>(&key), None);
    }

    #[test]
    fn test_corrupt_entry_is_absent_and_removed() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());
        let key = DocumentKey::new("owner", "repo");
        let path = cache.document_path(&key);
        write_atomic(&path, "not json").unwrap();

        assert_eq!(cache.get_document::<TestData>(&key), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_namespaces_are_separate() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());

        cache
            .set(&SearchKey::new("owner", SortMode::Stars, false), &sample())
            .unwrap();

        assert_eq!(
            cache.get_document::<TestData>(&DocumentKey::new("owner", "repo")),
            None
        );
    }

    #[test]
    fn test_set_document_sweeps_expired_documents() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());
        let old = DocumentKey::new("old", "repo");
        let fresh = DocumentKey::new("fresh", "repo");

        cache.set_document(&old, &sample()).unwrap();
        backdate(&cache.document_path(&old), 2 * DEFAULT_TTL.as_millis() as i64);

        cache.set_document(&fresh, &sample()).unwrap();

        assert!(!cache.document_path(&old).exists());
        assert_eq!(cache.get_document::<TestData>(&fresh), Some(sample()));
    }

    #[test]
    fn test_cleanup_leaves_search_namespace_alone() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());
        let key = SearchKey::new("rust", SortMode::Updated, false);

        cache.set(&key, &sample()).unwrap();
        backdate(&cache.search_path(&key), 2 * DEFAULT_TTL.as_millis() as i64);

        assert_eq!(cache.cleanup(), 0);
        assert!(cache.search_path(&key).exists());
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path());
        let search = SearchKey::new("rust", SortMode::Stars, false);
        let document = DocumentKey::new("owner", "repo");

        cache.set(&search, &sample()).unwrap();
        cache.set_document(&document, &sample()).unwrap();
        cache.clear().unwrap();

        assert_eq!(cache.get::<TestData>(&search), None);
        assert_eq!(cache.get_document::<TestData>(&document), None);
    }
}
