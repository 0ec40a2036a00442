//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Shared Cache Handle ==
/// Thread-safe shared handle to a cache store.
///
/// Every operation takes the write lock: reads mutate LRU order and
/// statistics, so there is no read-only path through the store.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;

/// Wraps a cache store in a shareable handle.
pub fn shared<V: Clone>(store: CacheStore<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(store))
}
