//! Cache entry with absolute expiry

use crate::consensus::ConsensusResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of a cached consensus result
pub const CACHE_TTL_MINUTES: i64 = 10;

/// A cached pipeline result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub result: ConsensusResult,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry expiring [`CACHE_TTL_MINUTES`] after `now`.
    pub fn new(result: ConsensusResult, now: DateTime<Utc>) -> Self {
        Self {
            result,
            created_at: now,
            expires_at: now + Duration::minutes(CACHE_TTL_MINUTES),
        }
    }

    /// Served as a hit only strictly before expiry
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Removed by the cleanup pass only strictly after expiry
    pub fn is_evictable(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::ConfidenceBand;

    fn entry(now: DateTime<Utc>) -> CacheEntry {
        CacheEntry::new(
            ConsensusResult {
                final_answer: "a".to_string(),
                confidence: ConfidenceBand::High,
                candidates: vec![],
                synthesis: None,
                verification: None,
                reasoning: String::new(),
                agreement_score: 1.0,
            },
            now,
        )
    }

    #[test]
    fn expires_after_ten_minutes() {
        let now = Utc::now();
        let e = entry(now);
        assert_eq!(e.expires_at - e.created_at, Duration::minutes(10));
        assert!(e.is_fresh(now + Duration::minutes(9)));
        assert!(!e.is_fresh(now + Duration::minutes(10)));
    }

    #[test]
    fn exact_expiry_is_stale_but_not_evicted() {
        let now = Utc::now();
        let e = entry(now);
        let at = now + Duration::minutes(10);
        assert!(!e.is_fresh(at));
        assert!(!e.is_evictable(at));
        assert!(e.is_evictable(at + Duration::milliseconds(1)));
    }
}
