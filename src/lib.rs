//! Lookup Cache - a bounded in-memory memoization cache
//!
//! Provides a generic key-value cache with TTL expiration and LRU eviction,
//! plus a wrapper that memoizes expensive asynchronous lookups.

pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod tasks;

pub use cache::{shared, CacheStore, SharedCache};
pub use config::CacheConfig;
pub use error::CacheError;
pub use lookup::{cache_key, CachedLookup};
pub use tasks::spawn_cleanup_task;
