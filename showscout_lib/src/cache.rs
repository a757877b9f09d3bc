//! Bounded in-memory response cache with TTL expiration and LRU eviction.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use lru::LruCache;
use regex::Regex;
use serde::Serialize;
use tokio::time::Instant;

/// A single cached value with its lifetime bounds.
struct CacheEntry<V> {
    data: V,
    created_at: Instant,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

struct Store<V> {
    entries: LruCache<String, CacheEntry<V>>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<V> Store<V> {
    /// Drops every expired entry, returning how many were removed.
    fn sweep(&mut self, now: Instant) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired.iter() {
            self.entries.pop(key);
        }
        expired.len()
    }

    /// Removes every key matching the predicate.
    fn remove_where(&mut self, pred: impl Fn(&str) -> bool) -> usize {
        let doomed: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, _)| pred(key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in doomed.iter() {
            self.entries.pop(key);
        }
        doomed.len()
    }
}

/// Snapshot of cache occupancy and effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// `hits / (hits + misses)`, or 0.0 before the first lookup.
    pub hit_rate: f64,
}

/// Key/value store for decoded API responses.
///
/// Entries expire `ttl` after insertion and are treated as absent from that
/// point on, even before a sweep physically removes them. When full, the
/// least-recently-used entry is evicted; `get` counts as a use, `has` does
/// not.
///
/// All methods take `&self` and finish without awaiting, so the cache can be
/// shared across tasks.
pub struct ResponseCache<V = serde_json::Value> {
    store: Mutex<Store<V>>,
    max_size: NonZeroUsize,
    default_ttl: Duration,
}

impl<V: Clone> ResponseCache<V> {
    /// Creates a cache holding at most `max_size` entries (at least one).
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        let max_size = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Mutex::new(Store {
                entries: LruCache::unbounded(),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            max_size,
            default_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store<V>> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn max_size(&self) -> usize {
        self.max_size.get()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the value for `key`, or `None` if missing or expired.
    ///
    /// An expired entry is removed. A hit marks the entry most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut store = self.lock();
        match store.entries.peek(key).map(|e| e.is_expired(now)) {
            None => {
                store.misses += 1;
                None
            }
            Some(true) => {
                store.entries.pop(key);
                store.misses += 1;
                None
            }
            Some(false) => {
                store.hits += 1;
                store.entries.get(key).map(|e| e.data.clone())
            }
        }
    }

    /// Inserts or replaces `key`, expiring after `ttl` (or the default TTL).
    ///
    /// Expired entries are swept first. If the key is new and the cache is
    /// still full, exactly one least-recently-used entry is evicted.
    /// Replacing an existing key never evicts, since the size does not grow.
    /// A zero TTL stores nothing and drops any previous value for the key.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);
        let now = Instant::now();
        let mut store = self.lock();
        store.sweep(now);

        if ttl.is_zero() {
            store.entries.pop(&key);
            return;
        }

        if !store.entries.contains(&key) && store.entries.len() >= self.max_size.get() {
            if let Some((evicted, entry)) = store.entries.pop_lru() {
                store.evictions += 1;
                tracing::debug!(
                    "Evicted cache entry {} after {:?}",
                    evicted,
                    now.duration_since(entry.created_at)
                );
            }
        }

        store.entries.put(
            key,
            CacheEntry {
                data: value,
                created_at: now,
                expires_at: now + ttl,
            },
        );
    }

    /// True if a live entry exists. Expired entries are removed; recency is untouched.
    pub fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut store = self.lock();
        match store.entries.peek(key).map(|e| e.is_expired(now)) {
            None => false,
            Some(true) => {
                store.entries.pop(key);
                false
            }
            Some(false) => true,
        }
    }

    /// Removes all entries and resets the counters.
    pub fn clear(&self) {
        let mut store = self.lock();
        store.entries.clear();
        store.hits = 0;
        store.misses = 0;
        store.evictions = 0;
    }

    /// Number of live entries. Sweeps expired entries first.
    pub fn size(&self) -> usize {
        let mut store = self.lock();
        store.sweep(Instant::now());
        store.entries.len()
    }

    /// Drops every entry whose key contains `pattern`. Returns the number removed.
    pub fn invalidate(&self, pattern: &str) -> usize {
        let removed = self.lock().remove_where(|key| key.contains(pattern));
        tracing::debug!("Invalidated {} cache entries matching {:?}", removed, pattern);
        removed
    }

    /// Drops every entry whose key matches `pattern`. Returns the number removed.
    pub fn invalidate_matching(&self, pattern: &Regex) -> usize {
        let removed = self.lock().remove_where(|key| pattern.is_match(key));
        tracing::debug!("Invalidated {} cache entries matching /{}/", removed, pattern);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let mut store = self.lock();
        store.sweep(Instant::now());
        let lookups = store.hits + store.misses;
        CacheStats {
            size: store.entries.len(),
            max_size: self.max_size.get(),
            hits: store.hits,
            misses: store.misses,
            evictions: store.evictions,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                store.hits as f64 / lookups as f64
            },
        }
    }
}
