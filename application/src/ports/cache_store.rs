//! Cache storage port
//!
//! The [`ResultCache`](crate::cache::ResultCache) service owns freshness and
//! de-duplication rules; stores only hold entries.

use chorus_domain::{CacheEntry, CacheKey};
use chrono::{DateTime, Utc};

/// Key/value storage for cached consensus results.
pub trait CacheStore: Send + Sync {
    /// Look up an entry regardless of its freshness.
    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Insert or replace an entry.
    fn insert(&self, key: CacheKey, entry: CacheEntry);

    /// Remove every entry whose expiry has passed; returns how many were removed.
    fn evict_expired(&self, now: DateTime<Utc>) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
