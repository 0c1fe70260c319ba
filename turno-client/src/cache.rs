//! Explicitly owned query caches
//!
//! Lookup results (user details, leader names) are cached in owned cache
//! objects constructed at startup and injected into their consumers - never
//! held as ambient process-wide state. Entries expire after a TTL and the
//! whole cache is flushed on logout.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Cache object that can be flushed wholesale (wired to logout)
pub trait Invalidate: Send + Sync {
    /// Drop every cached entry
    fn invalidate_all(&self);
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// TTL cache keyed by query parameters
///
/// Values are cloned out on read; keep them cheap to clone (or wrap in
/// `Arc`).
pub struct QueryCache<K, V> {
    map: DashMap<K, Entry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash, V: Clone> QueryCache<K, V> {
    /// Create a cache whose entries expire `ttl` after insertion
    pub fn new(ttl: Duration) -> Self {
        Self {
            map: DashMap::new(),
            ttl,
        }
    }

    /// Fetch a cached value; expired entries are evicted on read
    pub fn get(&self, key: &K) -> Option<V> {
        let expired = match self.map.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.map.remove(key);
        }
        None
    }

    /// Store a value under the given query key
    pub fn insert(&self, key: K, value: V) {
        self.map.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of (possibly expired) entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Eq + Hash + Send + Sync, V: Clone + Send + Sync> Invalidate for QueryCache<K, V> {
    fn invalidate_all(&self) {
        self.map.clear();
    }
}
