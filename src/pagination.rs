//! Pagination Module
//!
//! Offset/limit windows over a store scan, and the cache key each window
//! is memoized under.

use std::fmt;

use serde::Serialize;

use crate::error::StoreError;
use crate::store::Entry;

// == Public Constants ==
/// Largest page a client may request.
pub const MAX_LIMIT: usize = 100;

/// Prefix shared by every entry-listing cache key.
pub const CACHE_KEY_PREFIX: &str = "all_entries";

// == Pagination ==
/// A validated offset/limit window. `None` means the parameter was not given.
///
/// A zero offset skips nothing, so it is stored as `None` and shares a cache
/// key with the unpaginated request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    /// Maximum number of entries to return, in `1..=MAX_LIMIT`
    pub limit: Option<usize>,
    /// Number of leading entries to skip
    pub offset: Option<usize>,
}

impl Pagination {
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self {
            limit,
            offset: offset.filter(|o| *o > 0),
        }
    }

    /// Unpaginated window covering the whole store.
    pub fn all() -> Self {
        Self::default()
    }

    // == Cache Key ==
    /// Derives the cache key for this window.
    ///
    /// Unset parameters render as an empty segment. `?limit=5`,
    /// `?limit=5&offset=` and `?limit=5&offset=0` all share a key.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey(format!(
            "{}_{}_{}",
            CACHE_KEY_PREFIX,
            self.limit.map(|l| l.to_string()).unwrap_or_default(),
            self.offset
                .filter(|o| *o > 0)
                .map(|o| o.to_string())
                .unwrap_or_default(),
        ))
    }
}

// == Cache Key ==
/// Deterministic identifier for a pagination window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

// == Paginate ==
/// Walks `scan` once and materializes the requested window.
///
/// Skips `offset` entries, then collects up to `limit` entries and stops
/// pulling from the scan as soon as the window is full. An offset past the
/// end yields an empty page. Errors from skipped entries still abort.
pub fn paginate<I>(scan: I, page: Pagination) -> Result<Vec<Entry>, StoreError>
where
    I: IntoIterator<Item = Result<Entry, StoreError>>,
{
    let limit = page.limit.unwrap_or(usize::MAX);
    let mut to_skip = page.offset.unwrap_or(0);
    let mut entries = Vec::with_capacity(page.limit.unwrap_or(0));

    if limit == 0 {
        return Ok(entries);
    }

    for item in scan {
        let entry = item?;
        if to_skip > 0 {
            to_skip -= 1;
            continue;
        }
        entries.push(entry);
        if entries.len() >= limit {
            break;
        }
    }

    Ok(entries)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::cell::Cell;

    fn scan_of(keys: &[&str]) -> Vec<Result<Entry, StoreError>> {
        keys.iter()
            .enumerate()
            .map(|(i, k)| Ok(Entry::new(*k, json!(i + 1))))
            .collect()
    }

    fn keys_of(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_unspecified_returns_everything() {
        let page = paginate(scan_of(&["a", "b", "c"]), Pagination::all()).unwrap();
        assert_eq!(keys_of(&page), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_offset_and_limit_window() {
        let page = paginate(scan_of(&["a", "b", "c"]), Pagination::new(Some(2), Some(1))).unwrap();
        assert_eq!(
            page,
            vec![Entry::new("b", json!(2)), Entry::new("c", json!(3))]
        );
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let page = paginate(scan_of(&["a", "b", "c"]), Pagination::new(None, Some(10))).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_limit_only() {
        let page = paginate(scan_of(&["a", "b", "c"]), Pagination::new(Some(1), None)).unwrap();
        assert_eq!(keys_of(&page), vec!["a"]);
    }

    #[test]
    fn test_stops_pulling_once_window_is_full() {
        let pulled = Cell::new(0);
        let scan = (0..1_000).map(|i| {
            pulled.set(pulled.get() + 1);
            Ok(Entry::new(format!("k{i:04}"), json!(i)))
        });

        let page = paginate(scan, Pagination::new(Some(3), Some(2))).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(pulled.get(), 5);
    }

    #[test]
    fn test_error_in_skipped_region_propagates() {
        let scan = vec![
            Ok(Entry::new("a", json!(1))),
            Err(StoreError::Unavailable("read failed".to_string())),
            Ok(Entry::new("c", json!(3))),
        ];
        let result = paginate(scan, Pagination::new(Some(1), Some(2)));
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_error_after_window_is_not_reached() {
        let scan = vec![
            Ok(Entry::new("a", json!(1))),
            Err(StoreError::Unavailable("read failed".to_string())),
        ];
        let page = paginate(scan, Pagination::new(Some(1), None)).unwrap();
        assert_eq!(keys_of(&page), vec!["a"]);
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(Pagination::all().cache_key().as_str(), "all_entries__");
        assert_eq!(
            Pagination::new(Some(2), Some(1)).cache_key().as_str(),
            "all_entries_2_1"
        );
        assert_eq!(
            Pagination::new(None, Some(0)).cache_key().as_str(),
            "all_entries__"
        );
    }

    #[test]
    fn test_zero_offset_is_the_unpaginated_window() {
        assert_eq!(Pagination::new(None, Some(0)), Pagination::all());
        assert_eq!(
            Pagination::new(Some(5), Some(0)).cache_key(),
            Pagination::new(Some(5), None).cache_key()
        );

        let raw = Pagination {
            limit: None,
            offset: Some(0),
        };
        assert_eq!(raw.cache_key(), Pagination::all().cache_key());
    }

    #[test]
    fn test_cache_key_serializes_as_string() {
        let key = Pagination::new(Some(5), None).cache_key();
        assert_eq!(serde_json::to_value(&key).unwrap(), json!("all_entries_5_"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_window_bounds_and_order(
            total in 0usize..60,
            limit in proptest::option::of(1usize..=MAX_LIMIT),
            offset in proptest::option::of(0usize..80),
        ) {
            let scan = (0..total).map(|i| Ok(Entry::new(format!("key:{i:03}"), json!(i))));
            let page = paginate(scan, Pagination::new(limit, offset)).unwrap();

            let skipped = offset.unwrap_or(0).min(total);
            let expected_len = (total - skipped).min(limit.unwrap_or(usize::MAX));
            prop_assert_eq!(page.len(), expected_len);

            if let Some(limit) = limit {
                prop_assert!(page.len() <= limit);
            }
            for (i, entry) in page.iter().enumerate() {
                prop_assert_eq!(&entry.value, &json!(skipped + i));
            }
            prop_assert!(page.windows(2).all(|w| w[0].key < w[1].key));
        }

        #[test]
        fn prop_cache_key_is_deterministic(
            limit in proptest::option::of(1usize..=MAX_LIMIT),
            offset in proptest::option::of(0usize..10_000),
        ) {
            let a = Pagination::new(limit, offset);
            let b = Pagination::new(limit, offset);
            prop_assert_eq!(a.cache_key(), b.cache_key());
        }

        #[test]
        fn prop_distinct_windows_get_distinct_keys(
            a in (proptest::option::of(1usize..=MAX_LIMIT), proptest::option::of(0usize..500)),
            b in (proptest::option::of(1usize..=MAX_LIMIT), proptest::option::of(0usize..500)),
        ) {
            // Offsets of zero and unset describe the same window.
            let effective = |(limit, offset): (Option<usize>, Option<usize>)| {
                (limit, offset.unwrap_or(0))
            };
            prop_assume!(effective(a) != effective(b));
            let ka = Pagination::new(a.0, a.1).cache_key();
            let kb = Pagination::new(b.0, b.1).cache_key();
            prop_assert_ne!(ka, kb);
        }

        #[test]
        fn prop_equivalent_windows_share_a_key(
            limit in proptest::option::of(1usize..=MAX_LIMIT),
        ) {
            prop_assert_eq!(
                Pagination::new(limit, Some(0)).cache_key(),
                Pagination::new(limit, None).cache_key()
            );
        }
    }
}
