//! Mini LRU - A fixed-capacity, thread-safe LRU cache
//!
//! Stores opaque byte keys and values, evicting the least recently used
//! entry once capacity is reached.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::LruCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::run_soak;
