//! Response DTOs for the entry server API
//!
//! Defines the structure of outgoing JSON bodies other than the streamed
//! entry listing.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::pagination::CacheKey;

/// Response body for `GET /cache-stats`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// Number of stored pages
    pub size: usize,
    /// Stored cache keys in insertion order
    pub keys: Vec<CacheKey>,
    /// Cache TTL in milliseconds
    pub ttl: u64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            size: stats.size,
            ttl: stats.ttl_ms(),
            keys: stats.keys,
        }
    }
}

/// Response body for `/clear-cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
}

impl ClearCacheResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared successfully".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
