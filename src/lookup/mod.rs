//! Lookup Module
//!
//! Wraps expensive asynchronous lookups so repeated calls with the same
//! arguments are served from the cache until they expire.

mod cached;
mod key;

// Re-export public types
pub use cached::CachedLookup;
pub use key::cache_key;
