// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-session query cache.
//!
//! An entry belongs to the session generation it was fetched under. A
//! lookup under any other generation misses, so nothing fetched for one
//! identity is served to the next.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use estate_auth::SessionGeneration;

struct CacheEntry<T> {
    generation: SessionGeneration,
    fetched_at: Instant,
    value: Arc<T>,
}

/// Single-value cache keyed by session generation with a freshness window.
pub struct QueryCache<T> {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T> QueryCache<T> {
    /// Creates a cache. A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Returns the freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value if it was fetched under `generation` and is
    /// still fresh.
    pub fn get(&self, generation: SessionGeneration) -> Option<Arc<T>> {
        let entry = self.entry.lock();
        entry
            .as_ref()
            .filter(|e| e.generation == generation && e.fetched_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.value))
    }

    /// Stores a value fetched under `generation` and returns it shared.
    pub fn put(&self, generation: SessionGeneration, value: T) -> Arc<T> {
        let value = Arc::new(value);
        if !self.ttl.is_zero() {
            *self.entry.lock() = Some(CacheEntry {
                generation,
                fetched_at: Instant::now(),
                value: Arc::clone(&value),
            });
        }
        value
    }

    /// Drops the cached value.
    pub fn invalidate(&self) {
        self.entry.lock().take();
    }

    /// Returns `true` if a value is held, fresh or not.
    pub fn is_populated(&self) -> bool {
        self.entry.lock().is_some()
    }
}

impl<T> std::fmt::Debug for QueryCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("ttl", &self.ttl)
            .field("populated", &self.is_populated())
            .finish()
    }
}
