//! API Module
//!
//! HTTP handlers and routing for the entry server.
//!
//! # Endpoints
//! - `GET /entries` - Stream entries as a JSON array
//! - `GET /cache-stats` - Cache statistics
//! - `GET|POST /clear-cache` - Clear the page cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
