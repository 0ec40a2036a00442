//! Cache Key Derivation Module
//!
//! Turns a lookup's arguments into a deterministic string cache key.

use serde::Serialize;

// == Cache Key ==
/// Derives the cache key for an argument value.
///
/// The key is the JSON serialization of the arguments. This is
/// deterministic for structs, tuples, and sequences (field order is fixed
/// by the Serialize derive), which is what makes equal inputs map to the
/// same key. Map-typed arguments must use an ordered map such as BTreeMap
/// for the key to be stable.
///
/// Multi-argument lookups should pass their arguments as a tuple.
pub fn cache_key<A: Serialize>(args: &A) -> serde_json::Result<String> {
    serde_json::to_string(args)
}
