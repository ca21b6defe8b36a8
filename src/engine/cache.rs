//! Bounded, time-expiring memoization for route parsing.
//!
//! # Responsibilities
//! - Memoize segment-array → route-match computations
//! - Expire entries after a fixed TTL
//! - Cap total entry count, evicting by least-recent access
//!
//! # Design Decisions
//! - Owned by the engine, never a process-wide singleton
//! - Clock is injected so tests drive expiry deterministically
//! - One mutex over map + stamps: purge and evict must see the whole
//!   map atomically, so a sharded structure buys nothing here

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::engine::parser::RouteMatch;
use crate::observability::metrics;

/// Time source for the cache.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time source used outside tests.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    value: RouteMatch,
    inserted_at: Instant,
    last_access: Instant,
}

/// Bounded key → `RouteMatch` cache with TTL expiry.
pub struct ParseCache {
    ttl: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
    inner: Mutex<HashMap<String, CacheEntry>>,
}

impl ParseCache {
    /// Create a cache with the wall clock.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, Arc::new(SystemClock))
    }

    /// Create a cache with an injected time source.
    pub fn with_clock(ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            max_entries,
            clock,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Look up `key`, computing and storing on a miss.
    ///
    /// A hit within the TTL window returns the stored value without
    /// invoking `compute`; the result is observably equal to a fresh
    /// computation because the pipeline is pure.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> RouteMatch
    where
        F: FnOnce() -> RouteMatch,
    {
        let now = self.clock.now();
        let mut inner = self.inner.lock().expect("parse cache mutex poisoned");

        let expired = matches!(
            inner.get(key),
            Some(entry) if now.duration_since(entry.inserted_at) >= self.ttl
        );
        if expired {
            inner.remove(key);
        }

        if let Some(entry) = inner.get_mut(key) {
            entry.last_access = now;
            metrics::record_cache_hit();
            return entry.value.clone();
        }

        metrics::record_cache_miss();
        let value = compute();

        Self::purge_expired(&mut inner, now, self.ttl);
        while inner.len() >= self.max_entries {
            Self::evict_least_recent(&mut inner);
        }

        inner.insert(
            key.to_string(),
            CacheEntry { value: value.clone(), inserted_at: now, last_access: now },
        );
        metrics::record_cache_size(inner.len());
        value
    }

    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("parse cache mutex poisoned").len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(inner: &mut HashMap<String, CacheEntry>, now: Instant, ttl: Duration) {
        inner.retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
    }

    fn evict_least_recent(inner: &mut HashMap<String, CacheEntry>) {
        let oldest = inner
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            inner.remove(&key);
        }
    }
}
