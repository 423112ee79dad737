//! Entry Stream - streams an ordered key-value store over HTTP
//!
//! Lists store entries as a JSON array written incrementally under
//! backpressure, with paginated results memoized in a TTL cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod store;
pub mod stream;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_sweep_task;
