//! Error types for the lookup cache
//!
//! Provides unified error handling using thiserror.
//!
//! Cache operations themselves are total: absence is reported as `None`,
//! never as an error. The only errors this crate raises are configuration
//! errors, rejected eagerly at construction time.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the lookup cache.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// Cache capacity must allow at least one entry
    #[error("Invalid configuration: max_entries must be greater than zero")]
    InvalidMaxEntries,

    /// Default TTL must be a positive duration
    #[error("Invalid configuration: ttl must be greater than zero")]
    InvalidTtl,
}

// == Result Type Alias ==
/// Convenience Result type for the lookup cache.
pub type Result<T> = std::result::Result<T, CacheError>;
