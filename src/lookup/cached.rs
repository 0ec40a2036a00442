//! Cached Lookup Module
//!
//! The memoizing wrapper: pairs a producer function with a shared cache
//! and a key namespace, so repeated lookups with the same arguments skip
//! the producer until the cached result expires.

use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::lookup::cache_key;

// == Cached Lookup ==
/// Memoizes an asynchronous producer function.
///
/// Several wrappers may share one physical cache, each under its own
/// prefix (e.g. a fast suggestion lookup under `"autocomplete"` and a
/// full-entry lookup under `"query"`).
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lookup_cache::{shared, CacheConfig, CacheStore, CachedLookup};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache = shared(
///     CacheStore::new(CacheConfig::new(Duration::from_secs(300), 100)).unwrap(),
/// );
/// let lookup = CachedLookup::new(cache, "query", |word: String| async move {
///     Ok::<_, std::io::Error>(format!("definition of {word}"))
/// });
///
/// let first = lookup.lookup("cat".to_string()).await.unwrap();
/// let second = lookup.lookup("cat".to_string()).await.unwrap();
/// assert_eq!(first, second);
/// # }
/// ```
pub struct CachedLookup<V, P> {
    /// Shared cache serving this wrapper (and possibly others)
    cache: SharedCache<V>,
    /// Key namespace for this wrapper's entries
    prefix: String,
    /// The expensive operation whose results are memoized
    producer: P,
}

impl<V, P> CachedLookup<V, P>
where
    V: Clone,
{
    // == Constructor ==
    /// Creates a new cached lookup over the given cache and namespace.
    pub fn new(cache: SharedCache<V>, prefix: impl Into<String>, producer: P) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
            producer,
        }
    }

    // == Lookup ==
    /// Performs the lookup, serving from cache when possible.
    ///
    /// On a hit (after the lazy-expiry check) the producer is not invoked.
    /// On a miss the producer runs, its result is stored under the derived
    /// key with the configured TTL, and the result is returned. A producer
    /// failure propagates untouched and writes nothing to the cache.
    ///
    /// The cache lock is not held across the producer await: two
    /// concurrent lookups for the same key may both miss and both invoke
    /// the producer, with the last write winning. There is no in-flight
    /// deduplication.
    pub async fn lookup<A, Fut, E>(&self, args: A) -> std::result::Result<V, E>
    where
        A: Serialize,
        P: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        let key = match cache_key(&args) {
            Ok(key) => key,
            Err(err) => {
                // Underivable key: skip caching rather than surface a new
                // error class to the caller
                warn!(prefix = %self.prefix, error = %err, "cache key derivation failed, bypassing cache");
                return (self.producer)(args).await;
            }
        };

        if let Some(hit) = self.cache.write().await.get(&key, Some(&self.prefix)) {
            debug!(prefix = %self.prefix, "lookup served from cache");
            return Ok(hit);
        }

        let value = (self.producer)(args).await?;

        self.cache
            .write()
            .await
            .set(&key, value.clone(), None, Some(&self.prefix));
        debug!(prefix = %self.prefix, "lookup result cached");

        Ok(value)
    }
}
