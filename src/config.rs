//! Configuration Module
//!
//! Handles loading the soak runner configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Soak runner configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache capacity in entries. Kept signed so a negative value reaches
    /// `LruCache::new` and is rejected there.
    pub capacity: i64,
    /// Number of concurrent worker tasks
    pub workers: usize,
    /// Operations issued by each worker
    pub ops_per_worker: u64,
    /// Number of distinct keys the workload draws from
    pub key_space: u64,
    /// Base seed for the per-worker random generators
    pub seed: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Cache capacity in entries (default: 1024)
    /// - `SOAK_WORKERS` - Concurrent workers (default: 8)
    /// - `SOAK_OPS_PER_WORKER` - Operations per worker (default: 100000)
    /// - `SOAK_KEY_SPACE` - Distinct keys in the workload (default: 4096)
    /// - `SOAK_SEED` - Base random seed (default: 42)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("LRU_CAPACITY", defaults.capacity),
            workers: env_or("SOAK_WORKERS", defaults.workers),
            ops_per_worker: env_or("SOAK_OPS_PER_WORKER", defaults.ops_per_worker),
            key_space: env_or("SOAK_KEY_SPACE", defaults.key_space),
            seed: env_or("SOAK_SEED", defaults.seed),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1024,
            workers: 8,
            ops_per_worker: 100_000,
            key_space: 4096,
            seed: 42,
        }
    }
}

/// Reads and parses an environment variable, falling back when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
