//! Key-Value Persistence
//!
//! The cache never talks to a concrete storage backend. It goes through
//! [`KeyValueStore`], so a desktop build can persist to files while tests and
//! embedded hosts can use memory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use hashlink::LruCache;
use parking_lot::Mutex;

use crate::constants::MEMORY_STORE_CAPACITY;
use crate::error::{Error, Result};

/// Best-effort string key-value persistence
///
/// Implementations may fail; callers treat every failure as "absent".
/// Concurrent writers to the same key are allowed: last write wins.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store with LRU eviction
pub struct MemoryStore {
    entries: Mutex<LruCache<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_STORE_CAPACITY)
    }

    /// Create a store holding at most `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity.max(1))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    /// Store under the platform cache directory
    pub fn in_cache_dir() -> Result<Self> {
        Self::new(crate::utils::config_store::get_or_create_cache_dir()?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(Error::Invalid {
                message: format!("invalid cache key: {key:?}"),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // each writer gets its own temp file; the last rename wins and
        // readers never observe a partially written file
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_memory_store_evicts_least_recent() {
        let store = MemoryStore::with_capacity(2);
        store.set("a", "1").expect("set");
        store.set("b", "2").expect("set");
        assert_eq!(store.get("a").expect("get").as_deref(), Some("1"));
        store.set("c", "3").expect("set");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b").expect("get"), None);
        assert_eq!(store.get("c").expect("get").as_deref(), Some("3"));
    }

    #[test]
    fn test_file_store_round_trip_and_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("cache")).expect("store");
        assert_eq!(store.get("players").expect("get"), None);
        store.set("players", "first").expect("set");
        store.set("players", "second").expect("set");
        assert_eq!(store.get("players").expect("get").as_deref(), Some("second"));
        store.remove("players").expect("remove");
        assert_eq!(store.get("players").expect("get"), None);
    }

    #[test]
    fn test_file_store_concurrent_writers_last_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(FileStore::new(dir.path()).expect("store"));
        let first = "a".repeat(200_000);
        let second = "b".repeat(200_000);

        for _ in 0..50 {
            let writers: Vec<_> = [first.clone(), second.clone()]
                .into_iter()
                .map(|value| {
                    let store = store.clone();
                    std::thread::spawn(move || store.set("players", &value))
                })
                .collect();
            for writer in writers {
                writer.join().expect("join").expect("set");
            }
            let stored = store.get("players").expect("get").expect("present");
            assert!(stored == first || stored == second);
        }
        let leftovers = fs::read_dir(dir.path()).expect("read_dir").count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path()).expect("store");
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
