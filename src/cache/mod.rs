//! Cache Module
//!
//! In-memory TTL cache of paginated entry listings.

mod entry;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::CachedPage;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::EntryCache;

// == Public Constants ==
/// Default time-to-live of a cached page, in milliseconds
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default interval between expiry sweeps, in milliseconds
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 60 * 1000;
