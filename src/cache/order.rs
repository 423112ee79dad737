//! Insertion Order Module
//!
//! Remembers the order in which cache keys were first stored.

use std::collections::VecDeque;

use crate::pagination::CacheKey;

// == Insertion Order ==
/// Tracks cache keys oldest-first.
///
/// Re-inserting a key that is already tracked keeps its original position.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<CacheKey>,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Insert ==
    /// Appends `key` unless it is already tracked.
    pub fn insert(&mut self, key: &CacheKey) {
        if !self.contains(key) {
            self.order.push_back(key.clone());
        }
    }

    /// Keeps only keys for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&CacheKey) -> bool) {
        self.order.retain(keep);
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Keys oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &CacheKey> {
        self.order.iter()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
