//! Result cache service
//!
//! Wraps a [`CacheStore`] with the TTL rules and per-key in-flight locking:
//!
//! - a lookup is a hit only while `now < expires_at`
//! - every write first evicts all entries with `now > expires_at`
//! - callers holding an [`InFlightGuard`] for a key run the pipeline
//!   exclusively for that key, so concurrent identical requests do the work
//!   once

use crate::ports::cache_store::CacheStore;
use crate::ports::clock::Clock;
use chorus_domain::{CacheEntry, CacheKey, ConsensusResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

type KeyLock = Arc<AsyncMutex<()>>;

pub struct ResultCache {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    in_flight: Mutex<HashMap<CacheKey, KeyLock>>,
}

impl ResultCache {
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Fresh cached result for `key`, if any.
    pub fn get(&self, key: &CacheKey) -> Option<ConsensusResult> {
        let now = self.clock.now();
        match self.store.get(key) {
            Some(entry) if entry.is_fresh(now) => Some(entry.result),
            Some(_) => {
                debug!("Cache entry {} expired", key);
                None
            }
            None => None,
        }
    }

    /// Store `result` under `key`, evicting expired entries first.
    pub fn put(&self, key: CacheKey, result: ConsensusResult) {
        let now = self.clock.now();
        let evicted = self.store.evict_expired(now);
        if evicted > 0 {
            debug!("Evicted {} expired cache entries", evicted);
        }
        self.store.insert(key, CacheEntry::new(result, now));
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Wait until no other caller holds `key`, then hold it until the guard drops.
    pub async fn acquire(&self, key: &CacheKey) -> InFlightGuard<'_> {
        let lock = {
            let mut map = self.lock_in_flight();
            Arc::clone(map.entry(key.clone()).or_default())
        };
        let guard = lock.lock_owned().await;
        InFlightGuard {
            cache: self,
            key: key.clone(),
            guard: Some(guard),
        }
    }

    /// Number of keys with a pipeline run in progress or queued.
    pub fn in_flight(&self) -> usize {
        self.lock_in_flight().len()
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<CacheKey, KeyLock>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Exclusive hold on one cache key; released on drop.
pub struct InFlightGuard<'a> {
    cache: &'a ResultCache,
    key: CacheKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let Some(guard) = self.guard.take() else {
            return;
        };
        let lock = Arc::clone(OwnedMutexGuard::mutex(&guard));
        drop(guard);

        let mut map = self.cache.lock_in_flight();
        // Only the map and `lock` remain: nobody is waiting on this key.
        if Arc::strong_count(&lock) <= 2 {
            map.remove(&self.key);
        }
    }
}
