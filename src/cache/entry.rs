//! Cached Page Module
//!
//! A materialized pagination window plus the instant it was stored.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::store::Entry;

// == Cached Page ==
/// One memoized window of entries.
///
/// The entry list is shared behind an `Arc` so concurrent readers stream the
/// same allocation.
#[derive(Debug, Clone)]
pub struct CachedPage {
    /// The window's entries, in scan order
    pub data: Arc<Vec<Entry>>,
    /// When the page was stored
    pub inserted_at: Instant,
}

impl CachedPage {
    // == Constructor ==
    pub fn new(data: Vec<Entry>) -> Self {
        Self::with_inserted_at(data, Instant::now())
    }

    pub fn with_inserted_at(data: Vec<Entry>, inserted_at: Instant) -> Self {
        Self {
            data: Arc::new(data),
            inserted_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the page is older than `ttl` at `now`.
    ///
    /// Boundary condition: a page exactly `ttl` old is still fresh; it only
    /// becomes stale once its age strictly exceeds the TTL.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        self.age_at(now) > ttl
    }

    /// Age of the page at `now`; zero if `now` precedes insertion.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_new_page_is_fresh() {
        let page = CachedPage::new(vec![Entry::new("a", json!(1))]);
        assert_eq!(page.data.len(), 1);
        assert!(!page.is_expired_at(TTL, Instant::now()));
    }

    #[test]
    fn test_empty_page() {
        let page = CachedPage::new(Vec::new());
        assert!(page.data.is_empty());
        assert!(!page.is_expired_at(TTL, Instant::now()));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let start = Instant::now();
        let page = CachedPage::with_inserted_at(Vec::new(), start);

        assert!(!page.is_expired_at(TTL, start + TTL), "exactly TTL old is fresh");
        assert!(page.is_expired_at(TTL, start + TTL + Duration::from_millis(1)));
    }

    #[test]
    fn test_age_before_insertion_is_zero() {
        let now = Instant::now();
        let page = CachedPage::with_inserted_at(Vec::new(), now + Duration::from_secs(5));
        assert_eq!(page.age_at(now), Duration::ZERO);
    }

    #[test]
    fn test_clone_shares_data() {
        let page = CachedPage::new(vec![Entry::new("a", json!(1))]);
        let copy = page.clone();
        assert!(Arc::ptr_eq(&page.data, &copy.data));
    }
}
