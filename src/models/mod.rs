//! Request and Response models for the entry server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! query parameters and JSON response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ListEntriesParams;
pub use responses::{CacheStatsResponse, ClearCacheResponse, HealthResponse};
