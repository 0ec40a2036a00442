//! Configuration Module
//!
//! Handles cache configuration with validation and optional loading from
//! environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default entry lifespan: five minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default capacity: one hundred entries.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Cache configuration parameters.
///
/// All values can be overridden via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Default lifespan applied at `set` time unless overridden per call
    pub ttl: Duration,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default key namespace prepended to every key (empty string if None)
    pub key_prefix: Option<String>,
}

impl CacheConfig {
    /// Creates a new CacheConfig with the given TTL and capacity.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            key_prefix: None,
        }
    }

    /// Sets the default key namespace.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LOOKUP_CACHE_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `LOOKUP_CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `LOOKUP_CACHE_KEY_PREFIX` - Default key namespace (default: unset)
    pub fn from_env() -> Self {
        Self {
            ttl: env::var("LOOKUP_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TTL),
            max_entries: env::var("LOOKUP_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ENTRIES),
            key_prefix: env::var("LOOKUP_CACHE_KEY_PREFIX").ok(),
        }
    }

    /// Validates the configuration.
    ///
    /// A capacity of zero cannot hold entries and would degenerate the
    /// eviction logic; a zero TTL would expire every entry on write. Both
    /// are rejected here so they can never surface later during a `set`.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidMaxEntries);
        }
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
            key_prefix: None,
        }
    }
}
