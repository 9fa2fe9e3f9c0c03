//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check eviction, promotion and bookkeeping properties
//! against arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

use crate::cache::LruCache;
use crate::error::CacheError;

// == Strategies ==
/// Generates keys from a small alphabet so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..6, 1..3)
}

/// Generates arbitrary binary values, empty included
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..32)
}

/// Generates a set of distinct keys
fn distinct_keys_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::hash_set(prop::collection::vec(any::<u8>(), 1..16), min..max)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

/// A single cache operation
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: Vec<u8>, value: Vec<u8> },
    Get { key: Vec<u8> },
    Remove { key: Vec<u8> },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

// == Reference Model ==
/// Straightforward O(n) LRU, front = most recently used.
struct ModelLru {
    capacity: usize,
    entries: VecDeque<(Vec<u8>, Vec<u8>)>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    fn position(&self, key: &[u8]) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos)?;
        let value = entry.1.clone();
        self.entries.push_front(entry);
        Some(value)
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        if let Some(pos) = self.position(&key) {
            self.entries.remove(pos);
        } else if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front((key, value));
    }

    fn remove(&mut self, key: &[u8]) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    fn keys(&self) -> Vec<Vec<u8>> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any operation sequence, the cache matches a reference LRU in
    // results, recency order and size, and stays internally consistent.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let cache = LruCache::new(capacity).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(&key, &value);
                    model.set(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).ok_or(CacheError::KeyNotFound);
                    prop_assert_eq!(cache.get(&key), expected);
                }
                CacheOp::Remove { key } => {
                    let expected = if model.remove(&key) {
                        Ok(())
                    } else {
                        Err(CacheError::KeyNotFound)
                    };
                    prop_assert_eq!(cache.remove(&key), expected);
                }
            }
            prop_assert!(cache.is_consistent(), "Index and recency list diverged");
            prop_assert_eq!(cache.keys(), model.keys());
        }
    }

    // For any sequence of SET operations, the entry count never exceeds capacity.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let cache = LruCache::new(capacity).unwrap();

        for (key, value) in entries {
            cache.set(key, value);
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // With N distinct keys filling a cache of capacity N, inserting one more
    // evicts exactly the first key inserted.
    #[test]
    fn prop_lru_eviction_order(
        keys in distinct_keys_strategy(2, 10),
        new_key in prop::collection::vec(any::<u8>(), 1..16)
    ) {
        prop_assume!(!keys.contains(&new_key));

        let capacity = keys.len();
        let cache = LruCache::new(capacity).unwrap();
        for key in &keys {
            cache.set(key, b"value");
        }
        prop_assert_eq!(cache.len(), capacity);

        cache.set(&new_key, b"new");

        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(!cache.contains(&keys[0]), "Oldest key should have been evicted");
        prop_assert!(cache.contains(&new_key));
        for key in keys.iter().skip(1) {
            prop_assert!(cache.contains(key), "Only the oldest key may be evicted");
        }
    }

    // A GET on the oldest key protects it: the next oldest is evicted instead.
    #[test]
    fn prop_get_protects_from_eviction(
        keys in distinct_keys_strategy(3, 8),
        new_key in prop::collection::vec(any::<u8>(), 1..16)
    ) {
        prop_assume!(!keys.contains(&new_key));

        let cache = LruCache::new(keys.len()).unwrap();
        for key in &keys {
            cache.set(key, b"value");
        }

        cache.get(&keys[0]).unwrap();
        cache.set(&new_key, b"new");

        prop_assert!(cache.contains(&keys[0]), "Accessed key should survive eviction");
        prop_assert!(!cache.contains(&keys[1]), "Next oldest key should be evicted");
        prop_assert!(cache.contains(&new_key));
    }

    // Updating a present key never changes the entry count or evicts anything.
    #[test]
    fn prop_update_does_not_evict(
        keys in distinct_keys_strategy(1, 10),
        pick in any::<prop::sample::Index>(),
        value in value_strategy()
    ) {
        let cache = LruCache::new(keys.len()).unwrap();
        for key in &keys {
            cache.set(key, b"value");
        }

        let target = pick.get(&keys);
        cache.set(target, &value);

        prop_assert_eq!(cache.len(), keys.len());
        let cached: HashSet<Vec<u8>> = cache.keys().into_iter().collect();
        let expected: HashSet<Vec<u8>> = keys.iter().cloned().collect();
        prop_assert_eq!(cached, expected);
        prop_assert_eq!(cache.peek(target).unwrap(), value);
    }

    // A miss returns KeyNotFound and leaves size and order untouched.
    #[test]
    fn prop_miss_has_no_side_effect(
        keys in distinct_keys_strategy(1, 10),
        missing in prop::collection::vec(any::<u8>(), 1..16)
    ) {
        prop_assume!(!keys.contains(&missing));

        let cache = LruCache::new(keys.len() + 1).unwrap();
        for key in &keys {
            cache.set(key, b"value");
        }
        let before = cache.keys();

        prop_assert_eq!(cache.get(&missing), Err(CacheError::KeyNotFound));
        prop_assert_eq!(cache.keys(), before);
    }

    // Removing a present key drops exactly one entry and makes it unreachable.
    #[test]
    fn prop_remove_present_key(
        keys in distinct_keys_strategy(1, 10),
        pick in any::<prop::sample::Index>()
    ) {
        let cache = LruCache::new(keys.len()).unwrap();
        for key in &keys {
            cache.set(key, b"value");
        }

        let target = pick.get(&keys);
        cache.remove(target).unwrap();

        prop_assert_eq!(cache.len(), keys.len() - 1);
        prop_assert_eq!(cache.get(target), Err(CacheError::KeyNotFound));
        prop_assert_eq!(cache.remove(target), Err(CacheError::KeyNotFound));
    }
}
