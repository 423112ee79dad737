//! In-memory ordered store.
//!
//! Keys live in a `BTreeMap` behind a copy-on-write `Arc`, so a scan pins a
//! snapshot without holding the lock while it iterates.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::info;

use super::{Entry, EntryScan, EntryStore};
use crate::error::StoreError;

type Snapshot = Arc<BTreeMap<String, Value>>;

// == Memory Store ==
/// Ordered key-value store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Load From File ==
    /// Loads a store from a JSON file.
    ///
    /// Accepts either an object mapping keys to values or an array of
    /// `{"key": ..., "value": ...}` records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&raw)?;

        let store: Self = match document {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Entry::new(key, value))
                .collect(),
            other => serde_json::from_value::<Vec<Entry>>(other)?
                .into_iter()
                .collect(),
        };

        info!(path = %path.display(), entries = store.len(), "Loaded store from data file");
        Ok(store)
    }

    // == Put ==
    /// Inserts or replaces the value stored under `key`.
    pub fn put(&self, key: impl Into<String>, value: Value) -> Result<(), StoreError> {
        let mut guard = self.write()?;
        Arc::make_mut(&mut *guard).insert(key.into(), value);
        Ok(())
    }

    /// Inserts every entry from `entries`, replacing existing keys.
    pub fn extend(&self, entries: impl IntoIterator<Item = Entry>) -> Result<(), StoreError> {
        let mut guard = self.write()?;
        let map = Arc::make_mut(&mut *guard);
        for entry in entries {
            map.insert(entry.key, entry.value);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshot().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.data
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Snapshot>, StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl FromIterator<Entry> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let map: BTreeMap<String, Value> = iter
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect();
        Self {
            data: Arc::new(RwLock::new(Arc::new(map))),
        }
    }
}

impl EntryStore for MemoryStore {
    fn scan(&self) -> Result<EntryScan, StoreError> {
        Ok(Box::new(Cursor {
            snapshot: self.snapshot()?,
            last_key: None,
        }))
    }
}

// == Cursor ==
/// Owns its snapshot and re-seeks past the last key returned on every step.
struct Cursor {
    snapshot: Snapshot,
    last_key: Option<String>,
}

impl Iterator for Cursor {
    type Item = Result<Entry, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.last_key.as_deref() {
            None => self.snapshot.iter().next(),
            Some(last) => self
                .snapshot
                .range::<str, _>((Bound::Excluded(last), Bound::Unbounded))
                .next(),
        }
        .map(|(key, value)| Entry::new(key.clone(), value.clone()));

        let entry = next?;
        self.last_key = Some(entry.key.clone());
        Some(Ok(entry))
    }
}
