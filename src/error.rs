//! Error types for the LRU cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors returned by cache construction and lookups.
///
/// Keys are opaque bytes, so messages never echo them back.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity was zero or negative
    #[error("Invalid capacity: must be greater than zero")]
    InvalidCapacity,

    /// Key not present in the cache
    #[error("Key not found")]
    KeyNotFound,
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
