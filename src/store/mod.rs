//! Store Module
//!
//! Adapter over the ordered key-value store that backs the entry listing.
//! Scans are lazy and yield entries in ascending key order.

mod memory;
pub mod seed;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

pub use memory::MemoryStore;

// == Entry ==
/// A single key/value pair as read from the store at scan time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Lazy, ascending-key sequence of entries produced by [`EntryStore::scan`].
pub type EntryScan = Box<dyn Iterator<Item = Result<Entry, StoreError>> + Send>;

// == Entry Store ==
/// Read-only view of an ordered key-value store.
///
/// `scan` covers the whole keyspace as of the call and must not buffer the
/// full set; entries are produced one at a time. Implementations may block
/// on I/O, so callers drive scans from the blocking thread pool.
pub trait EntryStore: Send + Sync + 'static {
    /// Starts a scan over every entry in ascending key order.
    fn scan(&self) -> Result<EntryScan, StoreError>;
}
