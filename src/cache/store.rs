//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with an arena-backed
//! recency list, both guarded by one mutex.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{Entry, NodeIndex, RecencyList, MAX_PREALLOCATED_ENTRIES};
use crate::error::{CacheError, Result};

/// Index and recency order. Only ever touched while holding the lock.
#[derive(Debug)]
struct CacheState {
    /// Key to node position in `order`
    index: HashMap<Vec<u8>, NodeIndex>,
    /// Recency order, head = most recently used
    order: RecencyList,
}

// == LRU Cache ==
/// Fixed-capacity, thread-safe LRU cache over byte keys and values.
///
/// Every operation, `get` included, takes the same exclusive lock: a
/// lookup promotes the entry, which rewrites the recency list.
///
/// Keys and values are copied in on `set` and copied out on `get`, so
/// callers never share a buffer with the cache.
///
/// # Example
/// ```
/// use mini_lru::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.set("key1", "value1");
/// cache.set("key2", "value2");
/// cache.get("key1").unwrap();
/// cache.set("key3", "value3");
///
/// assert!(cache.get("key2").is_err());
/// assert_eq!(cache.get("key1").unwrap(), b"value1");
/// ```
#[derive(Debug)]
pub struct LruCache {
    /// Maximum number of entries, fixed at construction
    capacity: usize,
    state: Mutex<CacheState>,
}

impl LruCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Accepts any integer type. Zero, negative, or otherwise
    /// unrepresentable capacities fail with [`CacheError::InvalidCapacity`].
    pub fn new<C>(capacity: C) -> Result<Self>
    where
        C: TryInto<usize>,
    {
        let capacity = match capacity.try_into() {
            Ok(capacity) if capacity > 0 => capacity,
            _ => return Err(CacheError::InvalidCapacity),
        };

        let prealloc = capacity.min(MAX_PREALLOCATED_ENTRIES);
        debug!(capacity, "Created LRU cache");

        Ok(Self {
            capacity,
            state: Mutex::new(CacheState {
                index: HashMap::with_capacity(prealloc),
                order: RecencyList::with_capacity(prealloc),
            }),
        })
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    ///
    /// A miss returns [`CacheError::KeyNotFound`] and leaves the cache untouched.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        let mut state = self.state.lock();
        let idx = *state
            .index
            .get(key.as_ref())
            .ok_or(CacheError::KeyNotFound)?;

        state.order.touch(idx);
        Ok(state.order.get(idx).value.clone())
    }

    // == Set ==
    /// Stores a copy of `value` under `key`.
    ///
    /// An existing key has its value replaced and is promoted; the entry
    /// count does not change. A new key at full capacity first evicts the
    /// least recently used entry.
    pub fn set(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
        let (key, value) = (key.as_ref(), value.as_ref());
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if let Some(&idx) = state.index.get(key) {
            state.order.get_mut(idx).replace_value(value);
            state.order.touch(idx);
            return;
        }

        if state.order.len() >= self.capacity {
            if let Some(evicted) = state.order.evict_oldest() {
                state.index.remove(&evicted.key);
                trace!(key_len = evicted.key.len(), "Evicted least recently used entry");
            }
        }

        let idx = state.order.push_front(Entry::new(key, value));
        state.index.insert(key.to_vec(), idx);
    }

    // == Remove ==
    /// Removes `key` from the cache.
    ///
    /// Removing an absent key fails with [`CacheError::KeyNotFound`].
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Result<()> {
        let mut state = self.state.lock();
        let idx = state
            .index
            .remove(key.as_ref())
            .ok_or(CacheError::KeyNotFound)?;

        state.order.remove(idx);
        Ok(())
    }

    // == Peek ==
    /// Returns a copy of the value for `key` without promoting it.
    pub fn peek(&self, key: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        let state = self.state.lock();
        let idx = *state
            .index
            .get(key.as_ref())
            .ok_or(CacheError::KeyNotFound)?;

        Ok(state.order.get(idx).value.clone())
    }

    /// Returns true if `key` is cached. Does not promote.
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.state.lock().index.contains_key(key.as_ref())
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.state.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys ==
    /// Snapshot of all keys, most recently used first. Does not promote.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.state
            .lock()
            .order
            .iter()
            .map(|(_, entry)| entry.key.clone())
            .collect()
    }

    // == Clear ==
    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.order.len();
        state.index.clear();
        state.order.clear();
        debug!(dropped, "Cleared LRU cache");
    }

    // == Consistency Check ==
    /// Verifies the index and the recency list describe the same entries.
    ///
    /// Checks that the list links are sound, that every listed node is
    /// indexed under its own key at its own position, that the index holds
    /// nothing else, and that the entry count is within capacity. O(n).
    pub fn is_consistent(&self) -> bool {
        let state = self.state.lock();

        state.order.check_links()
            && state.order.len() <= self.capacity
            && state.index.len() == state.order.len()
            && state
                .order
                .iter()
                .all(|(idx, entry)| state.index.get(&entry.key) == Some(&idx))
    }
}
