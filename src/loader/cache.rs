//! Cache Store
//!
//! Write-through snapshot of the last successful result set. Every operation
//! is best-effort: failures are logged and swallowed, and never reach the
//! load path.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::store::KeyValueStore;

/// Persisted cache entry: `{ "records": [...], "timestamp": <ms> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<R> {
    /// Records captured at `timestamp`
    #[serde(alias = "players")]
    pub records: Vec<R>,
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl<R> CacheEntry<R> {
    /// Capture time as a UTC datetime
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// Time elapsed since capture (zero if the clock went backwards)
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.captured_at()
            .map(|at| (now - at).max(chrono::Duration::zero()))
            .unwrap_or_else(chrono::Duration::zero)
    }
}

/// Typed cache over a key-value store
pub struct CacheStore<R> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _marker: std::marker::PhantomData<fn() -> R>,
}

impl<R> Clone for CacheStore<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<R: Serialize + DeserializeOwned> CacheStore<R> {
    /// Cache entries under `key` in `store`
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persist `records` captured now; returns the written entry on success
    pub fn write(&self, records: &[R]) -> Option<CacheEntry<R>>
    where
        R: Clone,
    {
        self.write_at(records, Utc::now())
    }

    /// Persist `records` captured at `now`
    pub fn write_at(&self, records: &[R], now: DateTime<Utc>) -> Option<CacheEntry<R>>
    where
        R: Clone,
    {
        let entry = CacheEntry {
            records: records.to_vec(),
            timestamp: now.timestamp_millis(),
        };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Cache serialize failed for {}: {}", self.key, e);
                return None;
            }
        };
        match self.store.set(&self.key, &json) {
            Ok(()) => {
                tracing::debug!("Cached {} records under {}", entry.records.len(), self.key);
                Some(entry)
            }
            Err(e) => {
                tracing::warn!("Cache write failed for {}: {}", self.key, e);
                None
            }
        }
    }

    /// Read the entry; malformed or unavailable storage reads as absent
    pub fn read(&self) -> Option<CacheEntry<R>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read failed for {}: {}", self.key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Ignoring malformed cache entry {}: {}", self.key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::loader::store::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Invalid {
                message: "storage unavailable".to_string(),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Invalid {
                message: "quota exceeded".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_then_read() {
        let cache = CacheStore::<u32>::new(Arc::new(MemoryStore::new()), "k");
        assert!(cache.read().is_none());
        let written = cache.write(&[1, 2, 3]).expect("written");
        let read = cache.read().expect("entry");
        assert_eq!(read, written);
        assert_eq!(read.records, vec![1, 2, 3]);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let cache = CacheStore::<u32>::new(Arc::new(BrokenStore), "k");
        assert!(cache.write(&[1]).is_none());
        assert!(cache.read().is_none());
    }

    #[test]
    fn test_malformed_entry_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set("k", "{not json").expect("set");
        let cache = CacheStore::<u32>::new(store, "k");
        assert!(cache.read().is_none());
    }

    #[test]
    fn test_wire_format() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheStore::<u32>::new(store.clone(), "k");
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).single().expect("time");
        cache.write_at(&[7], at).expect("written");
        let raw = store.get("k").expect("get").expect("raw");
        assert_eq!(raw, r#"{"records":[7],"timestamp":1700000000000}"#);
    }

    #[test]
    fn test_age() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).single().expect("time");
        let entry = CacheEntry::<u32> {
            records: vec![],
            timestamp: at.timestamp_millis(),
        };
        let later = at + chrono::Duration::minutes(10);
        assert_eq!(entry.age(later), chrono::Duration::minutes(10));
        assert_eq!(entry.age(at - chrono::Duration::minutes(1)), chrono::Duration::zero());
    }
}
