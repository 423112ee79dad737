//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{DEFAULT_SWEEP_INTERVAL_MS, DEFAULT_TTL_MS};

/// Default number of chunks a streamed response may buffer ahead of the client.
pub const DEFAULT_STREAM_BUFFER: usize = 16;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Time-to-live of cached pages in milliseconds
    pub cache_ttl_ms: u64,
    /// Interval between expiry sweeps in milliseconds
    pub sweep_interval_ms: u64,
    /// Whether the background sweep task runs
    pub sweep_enabled: bool,
    /// Chunks buffered per streamed response before the producer waits
    pub stream_buffer: usize,
    /// Optional JSON file loaded into the store at startup
    pub data_file: Option<PathBuf>,
    /// Fill the store with generated demo data at startup
    pub seed_demo_data: bool,
    /// Fixed seed for the demo data; random when unset
    pub demo_seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL_MS` - Cache TTL in milliseconds (default: 300000)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 60000)
    /// - `APP_ENV` - `test` disables the sweep task
    /// - `SWEEP_ENABLED` - Explicitly enable/disable the sweep task
    /// - `STREAM_BUFFER` - Buffered chunks per response (default: 16)
    /// - `DATA_FILE` - JSON file to load into the store
    /// - `SEED_DEMO_DATA` - Generate demo data (default: false)
    /// - `DEMO_SEED` - Fixed seed for the demo data
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ephemeral = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("test"))
            .unwrap_or(false);

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            sweep_interval_ms: parse_var("SWEEP_INTERVAL_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.sweep_interval_ms),
            sweep_enabled: bool_var("SWEEP_ENABLED").unwrap_or(!ephemeral),
            stream_buffer: parse_var("STREAM_BUFFER")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.stream_buffer),
            data_file: env::var("DATA_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            seed_demo_data: bool_var("SEED_DEMO_DATA").unwrap_or(defaults.seed_demo_data),
            demo_seed: parse_var("DEMO_SEED"),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl_ms: DEFAULT_TTL_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            sweep_enabled: true,
            stream_buffer: DEFAULT_STREAM_BUFFER,
            data_file: None,
            seed_demo_data: false,
            demo_seed: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn bool_var(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
