//! Cache Sweep Task
//!
//! Background task that periodically evicts expired cache pages.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::EntryCache;

/// Spawns a background task that sweeps expired pages every `interval`.
///
/// The first sweep runs one full interval after spawning. Ticks missed while
/// the write lock was contended are not replayed. The returned handle aborts
/// the task during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(EntryCache::new(Duration::from_secs(300))));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: Arc<RwLock<EntryCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache sweep task");

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.sweep();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Cache sweep: evicted expired pages");
            } else {
                debug!(remaining, "Cache sweep: no expired pages");
            }
        }
    })
}
