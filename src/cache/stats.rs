//! Cache Statistics Module
//!
//! Point-in-time snapshot of the page cache for the admin surface.

use std::time::Duration;

use crate::pagination::CacheKey;

// == Cache Stats ==
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    /// Number of stored pages, fresh or stale
    pub size: usize,
    /// Stored keys in insertion order
    pub keys: Vec<CacheKey>,
    /// Configured time-to-live
    pub ttl: Duration,
}

impl CacheStats {
    /// TTL in whole milliseconds, as reported over HTTP.
    pub fn ttl_ms(&self) -> u64 {
        u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX)
    }
}
