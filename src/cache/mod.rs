//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with LRU eviction.

mod entry;
mod list;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::Entry;
pub use list::{NodeIndex, RecencyList};
pub use store::LruCache;

// == Public Constants ==
/// Upper bound on slots reserved up front; larger caches grow on demand
pub const MAX_PREALLOCATED_ENTRIES: usize = 4096;
