//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL
//! expiration. Keys are namespaced by an optional prefix so one physical
//! cache can serve several logical caches without collisions.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cache Store ==
/// Bounded cache storage with LRU eviction and lazy TTL expiry.
///
/// Generic over the cached value type. All operations are total: absence
/// is reported as `None`, never as an error.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage, keyed by fully-qualified (prefixed) key
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Capacity, default TTL and default key namespace
    config: CacheConfig,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore from a validated configuration.
    ///
    /// # Errors
    /// Returns a configuration error if `max_entries` is zero or the
    /// default TTL is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            config,
        })
    }

    // == Qualify Key ==
    /// Builds the fully-qualified key: `prefix + ":" + key`.
    ///
    /// The per-call prefix wins over the configured default; a missing
    /// prefix falls back to the empty string.
    fn qualify(&self, key: &str, prefix: Option<&str>) -> String {
        let prefix = prefix
            .or(self.config.key_prefix.as_deref())
            .unwrap_or_default();
        format!("{prefix}:{key}")
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL override.
    ///
    /// If the key already holds an entry (live or stale), that entry is
    /// removed first so reinsertion lands at the most-recently-used
    /// position. If the cache is then at capacity, the least recently used
    /// entry is evicted; a single `set` evicts at most one entry.
    ///
    /// # Arguments
    /// * `key` - The raw (unprefixed) key
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL override (uses the configured TTL if None)
    /// * `prefix` - Optional key namespace override
    pub fn set(&mut self, key: &str, value: V, ttl: Option<Duration>, prefix: Option<&str>) {
        let k = self.qualify(key, prefix);

        // Remove any existing entry so reinsertion refreshes recency
        if self.entries.remove(&k).is_some() {
            self.lru.remove(&k);
        }

        // At capacity: evict the least recently used entry
        if self.entries.len() >= self.config.max_entries {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        let effective_ttl = ttl.unwrap_or(self.config.ttl);
        self.entries.insert(k.clone(), CacheEntry::new(value, effective_ttl));

        // Update LRU tracker (touch moves to front)
        self.lru.touch(&k);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired, moving the entry to the
    /// most-recently-used position. An expired entry is purged on this
    /// first touch and reported as absent (lazy expiry).
    pub fn get(&mut self, key: &str, prefix: Option<&str>) -> Option<V> {
        let k = self.qualify(key, prefix);

        let Some(entry) = self.entries.get(&k) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            // Purge the expired entry as a side effect of the read
            self.entries.remove(&k);
            self.lru.remove(&k);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        let value = entry.value.clone();
        self.stats.record_hit();
        self.lru.touch(&k);
        Some(value)
    }

    // == Has ==
    /// Checks whether a key holds a live entry.
    ///
    /// Delegates to `get`, so it carries the same side effects: an expired
    /// entry is purged, and the LRU position and hit/miss counters update
    /// exactly as for a read.
    pub fn has(&mut self, key: &str, prefix: Option<&str>) -> bool {
        self.get(key, prefix).is_some()
    }

    // == Delete ==
    /// Removes an entry by key. No-op if the key is absent.
    pub fn delete(&mut self, key: &str, prefix: Option<&str>) {
        let k = self.qualify(key, prefix);
        if self.entries.remove(&k).is_some() {
            self.lru.remove(&k);
            self.stats.set_total_entries(self.entries.len());
        }
    }

    // == Clear ==
    /// Removes all entries unconditionally, regardless of prefix.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Lazy expiry on read is the correctness mechanism; this eager sweep
    /// exists for memory-pressure scenarios where stale entries would
    /// otherwise linger between reads. Returns the number of entries
    /// removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.lru.remove(&key);
            self.stats.record_expiration();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use std::thread::sleep;

    fn test_store(max_entries: usize) -> CacheStore<String> {
        CacheStore::new(CacheConfig::new(Duration::from_secs(300), max_entries)).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store = test_store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_rejects_zero_capacity() {
        let result = CacheStore::<String>::new(CacheConfig::new(Duration::from_secs(300), 0));
        assert!(matches!(result, Err(CacheError::InvalidMaxEntries)));
    }

    #[test]
    fn test_store_rejects_zero_ttl() {
        let result = CacheStore::<String>::new(CacheConfig::new(Duration::ZERO, 100));
        assert!(matches!(result, Err(CacheError::InvalidTtl)));
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), None, None);
        let value = store.get("key1", None);

        assert_eq!(value, Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = test_store(100);

        assert_eq!(store.get("nonexistent", None), None);
    }

    #[test]
    fn test_store_has() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), None, None);

        assert!(store.has("key1", None));
        assert!(!store.has("missing", None));
    }

    #[test]
    fn test_store_delete() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), None, None);
        store.delete("key1", None);

        assert!(store.is_empty());
        assert_eq!(store.get("key1", None), None);
    }

    #[test]
    fn test_store_delete_nonexistent_is_noop() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), None, None);
        store.delete("nonexistent", None);

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_clear() {
        let mut store = test_store(100);

        store.set("key1", "a".to_string(), None, Some("autocomplete"));
        store.set("key2", "b".to_string(), None, Some("query"));

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("key1", Some("autocomplete")), None);
        assert_eq!(store.get("key2", Some("query")), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), None, None);
        store.set("key1", "value2".to_string(), None, None);

        assert_eq!(store.get("key1", None), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = test_store(100);

        // Set with a 20ms TTL override
        store.set("key1", "value1".to_string(), Some(Duration::from_millis(20)), None);

        // Accessible immediately
        assert!(store.has("key1", None));

        sleep(Duration::from_millis(50));

        // Expired: absent, and the entry is purged on first touch
        assert_eq!(store.get("key1", None), None);
        assert_eq!(store.len(), 0);
        assert!(!store.has("key1", None));
    }

    #[test]
    fn test_store_expired_read_purges_exactly_one() {
        let mut store = test_store(100);

        store.set("gone", "v".to_string(), Some(Duration::from_millis(10)), None);
        store.set("kept", "v".to_string(), None, None);
        assert_eq!(store.len(), 2);

        sleep(Duration::from_millis(30));

        assert_eq!(store.get("gone", None), None);
        assert_eq!(store.len(), 1);
        assert!(store.has("kept", None));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = test_store(2);

        store.set("a", "1".to_string(), None, None);
        store.set("b", "2".to_string(), None, None);
        store.set("c", "3".to_string(), None, None);

        // a was least recently used and is evicted
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a", None), None);
        assert!(store.has("b", None));
        assert!(store.has("c", None));
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = test_store(2);

        store.set("a", "1".to_string(), None, None);
        store.set("b", "2".to_string(), None, None);

        // Promote a to most recently used, making b the eviction target
        assert!(store.has("a", None));

        store.set("c", "3".to_string(), None, None);

        assert!(store.has("a", None));
        assert_eq!(store.get("b", None), None);
        assert!(store.has("c", None));
    }

    #[test]
    fn test_store_overwrite_at_capacity_keeps_other_keys() {
        let mut store = test_store(2);

        store.set("a", "1".to_string(), None, None);
        store.set("b", "2".to_string(), None, None);

        // Overwriting an existing key at capacity must not evict the other
        store.set("a", "1b".to_string(), None, None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a", None), Some("1b".to_string()));
        assert!(store.has("b", None));
    }

    #[test]
    fn test_store_prefix_isolation() {
        let mut store = test_store(100);

        store.set("cat", "suggestions".to_string(), None, Some("autocomplete"));
        store.set("cat", "definition".to_string(), None, Some("query"));

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("cat", Some("autocomplete")),
            Some("suggestions".to_string())
        );
        assert_eq!(store.get("cat", Some("query")), Some("definition".to_string()));
    }

    #[test]
    fn test_store_configured_default_prefix() {
        let config =
            CacheConfig::new(Duration::from_secs(300), 100).with_key_prefix("query");
        let mut store: CacheStore<String> = CacheStore::new(config).unwrap();

        store.set("cat", "definition".to_string(), None, None);

        // Default prefix and explicit prefix address the same entry
        assert_eq!(store.get("cat", Some("query")), Some("definition".to_string()));
        // A different explicit prefix does not
        assert_eq!(store.get("cat", Some("autocomplete")), None);
    }

    #[test]
    fn test_store_stats() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), None, None);
        store.get("key1", None); // hit
        store.get("nonexistent", None); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_stats_expiration() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(10)), None);
        sleep(Duration::from_millis(30));
        store.get("key1", None);

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = test_store(100);

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(10)), None);
        store.set("key2", "value2".to_string(), Some(Duration::from_secs(10)), None);

        sleep(Duration::from_millis(30));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.has("key2", None));
    }

    #[test]
    fn test_store_non_string_values() {
        let config = CacheConfig::new(Duration::from_secs(300), 100);
        let mut store: CacheStore<Vec<u32>> = CacheStore::new(config).unwrap();

        store.set("nums", vec![1, 2, 3], None, None);
        assert_eq!(store.get("nums", None), Some(vec![1, 2, 3]));
    }
}
