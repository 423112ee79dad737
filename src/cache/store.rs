//! Page Cache Module
//!
//! TTL cache of materialized pagination windows. Expiry is checked lazily on
//! read and enforced by a periodic sweep; reads never mutate the table.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::{CacheStats, CachedPage, InsertionOrder};
use crate::pagination::CacheKey;
use crate::store::Entry;

// == Entry Cache ==
/// Mapping from [`CacheKey`] to the page stored under it.
///
/// Holds at most one page per key. Shared between handlers as
/// `Arc<RwLock<EntryCache>>`: lookups take the read lock, everything else
/// the write lock.
#[derive(Debug)]
pub struct EntryCache {
    /// Stored pages
    pages: HashMap<CacheKey, CachedPage>,
    /// Keys in first-insertion order, for stats
    order: InsertionOrder,
    /// Maximum age of a servable page
    ttl: Duration,
}

impl EntryCache {
    // == Constructor ==
    pub fn new(ttl: Duration) -> Self {
        Self {
            pages: HashMap::new(),
            order: InsertionOrder::new(),
            ttl,
        }
    }

    // == Get ==
    /// Returns the page under `key` if present and not older than the TTL.
    ///
    /// A stale page reads as a miss but stays in the table until swept.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<Entry>>> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &CacheKey, now: Instant) -> Option<Arc<Vec<Entry>>> {
        self.pages
            .get(key)
            .filter(|page| !page.is_expired_at(self.ttl, now))
            .map(|page| Arc::clone(&page.data))
    }

    // == Put ==
    /// Stores `data` under `key`, replacing any previous page and resetting
    /// its age. Returns the shared handle to the stored list.
    pub fn put(&mut self, key: CacheKey, data: Vec<Entry>) -> Arc<Vec<Entry>> {
        self.insert_page(key, CachedPage::new(data))
    }

    pub fn insert_page(&mut self, key: CacheKey, page: CachedPage) -> Arc<Vec<Entry>> {
        let data = Arc::clone(&page.data);
        self.order.insert(&key);
        self.pages.insert(key, page);
        data
    }

    // == Clear ==
    /// Removes every page. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.pages.len();
        self.pages.clear();
        self.order.clear();
        removed
    }

    // == Sweep ==
    /// Removes all pages older than the TTL. Returns how many were dropped.
    pub fn sweep(&mut self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.pages.len();
        self.pages.retain(|_, page| !page.is_expired_at(ttl, now));

        let pages = &self.pages;
        self.order.retain(|key| pages.contains_key(key));

        before - self.pages.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.pages.len(),
            keys: self.order.iter().cloned().collect(),
            ttl: self.ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);

    fn page(keys: &[&str]) -> Vec<Entry> {
        keys.iter().map(|k| Entry::new(*k, json!(k))).collect()
    }

    fn key(limit: Option<usize>, offset: Option<usize>) -> CacheKey {
        Pagination::new(limit, offset).cache_key()
    }

    #[test]
    fn test_cache_new() {
        let cache = EntryCache::new(TTL);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().ttl, TTL);
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = EntryCache::new(TTL);
        let stored = cache.put(key(None, None), page(&["a", "b"]));

        let hit = cache.get(&key(None, None)).unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
        assert_eq!(hit.len(), 2);
    }

    #[test]
    fn test_get_missing_key() {
        let cache = EntryCache::new(TTL);
        assert!(cache.get(&key(Some(1), None)).is_none());
    }

    #[test]
    fn test_put_overwrites_single_entry() {
        let mut cache = EntryCache::new(TTL);
        cache.put(key(Some(2), None), page(&["a"]));
        cache.put(key(Some(2), None), page(&["x", "y"]));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(Some(2), None)).unwrap().len(), 2);
    }

    #[test]
    fn test_stale_page_is_a_miss_but_not_removed() {
        let mut cache = EntryCache::new(TTL);
        cache.put(key(None, None), page(&["a"]));

        let later = Instant::now() + TTL + Duration::from_millis(1);
        assert!(cache.get_at(&key(None, None), later).is_none());
        assert_eq!(cache.len(), 1, "reads never evict");
    }

    #[test]
    fn test_stale_page_with_real_clock() {
        let mut cache = EntryCache::new(Duration::from_millis(20));
        cache.put(key(None, None), page(&["a"]));
        assert!(cache.get(&key(None, None)).is_some());

        std::thread::sleep(Duration::from_millis(50));
        assert!(cache.get(&key(None, None)).is_none());
    }

    #[test]
    fn test_put_resets_age() {
        let start = Instant::now();
        let mut cache = EntryCache::new(TTL);
        cache.insert_page(key(None, None), CachedPage::with_inserted_at(page(&["a"]), start));

        let later = start + TTL + Duration::from_secs(1);
        assert!(cache.get_at(&key(None, None), later).is_none());

        cache.insert_page(key(None, None), CachedPage::with_inserted_at(page(&["b"]), later));
        assert!(cache.get_at(&key(None, None), later).is_some());
    }

    #[test]
    fn test_clear() {
        let mut cache = EntryCache::new(TTL);
        cache.put(key(None, None), page(&["a"]));
        cache.put(key(Some(1), Some(0)), page(&["a"]));

        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
        assert!(cache.stats().keys.is_empty());
        assert!(cache.get(&key(None, None)).is_none());
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let start = Instant::now();
        let mut cache = EntryCache::new(TTL);
        cache.insert_page(key(Some(1), None), CachedPage::with_inserted_at(page(&["old"]), start));
        cache.insert_page(
            key(Some(2), None),
            CachedPage::with_inserted_at(page(&["new"]), start + Duration::from_secs(200)),
        );

        let removed = cache.sweep_at(start + Duration::from_secs(301));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.stats().keys,
            vec![key(Some(2), None)],
            "swept keys leave the stats listing"
        );
    }

    #[test]
    fn test_sweep_empty_cache() {
        let mut cache = EntryCache::new(TTL);
        assert_eq!(cache.sweep(), 0);
    }

    #[test]
    fn test_stats_reflect_insertion_order() {
        let mut cache = EntryCache::new(TTL);
        cache.put(key(Some(5), None), page(&[]));
        cache.put(key(None, None), page(&[]));
        cache.put(key(Some(1), Some(3)), page(&[]));
        cache.put(key(Some(5), None), page(&["again"]));

        let stats = cache.stats();
        assert_eq!(stats.size, 3);
        assert_eq!(
            stats.keys,
            vec![key(Some(5), None), key(None, None), key(Some(1), Some(3))]
        );
        assert_eq!(stats.ttl, TTL);
    }
}
