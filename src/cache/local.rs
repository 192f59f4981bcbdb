use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Entry with its expiration instant. Values are bincode serialized so the
/// cache stays type-agnostic.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Local in-memory TTL cache backed by DashMap.
///
/// Expired entries are evicted lazily on read and by [`purge_expired`],
/// which callers may run periodically.
///
/// [`purge_expired`]: LocalCache::purge_expired
#[derive(Debug)]
pub struct LocalCache {
    store: Arc<DashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LocalCache {
    pub fn new() -> Self {
        // DashMap requires a power-of-two shard count.
        Self::with_shard_count((num_cpus::get() * 4).next_power_of_two())
    }

    pub fn with_shard_count(shard_count: usize) -> Self {
        Self {
            store: Arc::new(DashMap::with_shard_amount(shard_count)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: DeserializeOwned,
    {
        if let Some(entry) = self.store.get(key) {
            if entry.is_expired() {
                drop(entry);
                self.store.remove(key);
                self.misses.fetch_add(1, Ordering::Relaxed);

                return Ok(None);
            }

            let value: V = bincode::deserialize(&entry.data)
                .context("failed to deserialize cached value")?;

            self.hits.fetch_add(1, Ordering::Relaxed);

            Ok(Some(value))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);

            Ok(None)
        }
    }

    pub fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize,
    {
        let data = bincode::serialize(value).context("failed to serialize value")?;

        self.store
            .insert(key.to_string(), CacheEntry::new(data, ttl));

        Ok(())
    }

    pub fn delete(&self, key: &str) {
        self.store.remove(key);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.store.len();

        self.store.retain(|_, entry| !entry.is_expired());

        before - self.store.len()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let cache = LocalCache::new();

        cache
            .set("key", &"value".to_string(), Duration::from_secs(60))
            .unwrap();

        let value: Option<String> = cache.get("key").unwrap();

        assert_eq!(value, Some("value".to_string()));
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn missing_keys_are_misses() {
        let cache = LocalCache::new();

        let value: Option<String> = cache.get("absent").unwrap();

        assert_eq!(value, None);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let cache = LocalCache::new();

        cache
            .set("key", &"value".to_string(), Duration::from_secs(0))
            .unwrap();

        let value: Option<String> = cache.get("key").unwrap();

        assert_eq!(value, None);
        assert!(cache.is_empty());
    }

    #[test]
    fn delete_removes_the_entry() {
        let cache = LocalCache::new();

        cache.set("key", &1u64, Duration::from_secs(60)).unwrap();
        cache.delete("key");

        let value: Option<u64> = cache.get("key").unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let cache = LocalCache::new();

        cache.set("old", &1u64, Duration::from_secs(0)).unwrap();
        cache.set("live", &2u64, Duration::from_secs(60)).unwrap();

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
    }
}
