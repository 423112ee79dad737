//! API Handlers
//!
//! HTTP request handlers for each entry server endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::EntryCache;
use crate::config::{Config, DEFAULT_STREAM_BUFFER};
use crate::error::{ApiError, Result};
use crate::models::{CacheStatsResponse, ClearCacheResponse, HealthResponse, ListEntriesParams};
use crate::pagination::{paginate, Pagination};
use crate::store::{Entry, EntryStore};
use crate::stream::{body_channel, stream_json_array, StreamOutcome, StreamTally};

/// Application state shared across all handlers.
///
/// The page cache sits behind `Arc<RwLock<>>`; the store is shared read-only.
#[derive(Clone)]
pub struct AppState {
    /// TTL cache of materialized pages
    pub cache: Arc<RwLock<EntryCache>>,
    /// Backing ordered key-value store
    pub store: Arc<dyn EntryStore>,
    /// Chunks buffered per streamed response
    pub stream_buffer: usize,
    /// How finished entry streams ended
    pub streams: Arc<StreamTally>,
}

impl AppState {
    /// Creates a new AppState with the given cache and store.
    pub fn new(cache: EntryCache, store: Arc<dyn EntryStore>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            store,
            stream_buffer: DEFAULT_STREAM_BUFFER,
            streams: Arc::new(StreamTally::default()),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, store: Arc<dyn EntryStore>) -> Self {
        Self {
            stream_buffer: config.stream_buffer,
            ..Self::new(EntryCache::new(config.cache_ttl()), store)
        }
    }

    pub fn with_stream_buffer(mut self, stream_buffer: usize) -> Self {
        self.stream_buffer = stream_buffer;
        self
    }

    // == Load Page ==
    /// Returns the entries for `page`, from cache when fresh, otherwise by
    /// scanning the store and caching the result.
    ///
    /// Concurrent misses on one key may each scan; the last write wins.
    pub async fn load_page(&self, page: Pagination) -> Result<Arc<Vec<Entry>>> {
        let started = Instant::now();
        let key = page.cache_key();

        if let Some(entries) = self.cache.read().await.get(&key) {
            debug!(
                %key,
                entries = entries.len(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "Cache hit"
            );
            return Ok(entries);
        }

        debug!(%key, "Cache miss: scanning store");
        let store = Arc::clone(&self.store);
        let entries = tokio::task::spawn_blocking(move || paginate(store.scan()?, page))
            .await
            .map_err(|e| ApiError::Internal(format!("store scan task failed: {e}")))??;

        let entries = self.cache.write().await.put(key.clone(), entries);
        info!(
            %key,
            entries = entries.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Store scan completed"
        );
        Ok(entries)
    }
}

/// Handler for GET /entries
///
/// Streams the requested window as a JSON array. Store failures surface as
/// a 500 before any byte is sent; after that the stream can only be cut.
pub async fn list_entries_handler(
    State(state): State<AppState>,
    Query(params): Query<ListEntriesParams>,
) -> Result<Response> {
    let page = params.validate().map_err(ApiError::InvalidRequest)?;
    let entries = state.load_page(page).await?;

    let (sink, body) = body_channel(state.stream_buffer);
    let streams = Arc::clone(&state.streams);
    tokio::spawn(async move {
        let started = Instant::now();
        let items = (0..entries.len()).map(move |i| Ok(entries[i].clone()));
        let outcome = stream_json_array(items, sink).await;
        streams.record(outcome);
        match outcome {
            StreamOutcome::Completed { items } => debug!(
                items,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Entry stream completed"
            ),
            StreamOutcome::Disconnected { items } => {
                debug!(items, "Entry stream ended by client disconnect")
            }
            // Already logged by the responder.
            StreamOutcome::Failed { .. } => {}
        }
    });

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Handler for GET /cache-stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(stats.into())
}

/// Handler for GET|POST /clear-cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let removed = state.cache.write().await.clear();
    info!(removed, "Cache cleared");
    Json(ClearCacheResponse::cleared())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
