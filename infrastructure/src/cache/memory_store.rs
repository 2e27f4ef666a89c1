//! Process-local cache store.

use chorus_application::ports::cache_store::CacheStore;
use chorus_domain::{CacheEntry, CacheKey};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// `HashMap` behind a mutex; every operation holds the lock only briefly.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheStore for InMemoryCacheStore {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries().get(key).cloned()
    }

    fn insert(&self, key: CacheKey, entry: CacheEntry) {
        self.entries().insert(key, entry);
    }

    fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_evictable(now));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries().len()
    }
}
