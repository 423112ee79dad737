//! Entry Stream - streams an ordered key-value store over HTTP
//!
//! Lists store entries as a JSON array with a TTL page cache in front.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use entry_stream::store::{seed, MemoryStore};
use entry_stream::{create_router, spawn_sweep_task, AppState, Config};

/// Main entry point for the entry server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the store (data file, demo seed, or empty)
/// 4. Start the cache sweep task unless disabled
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "entry_stream=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Entry Stream server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}ms, sweep_interval={}ms, sweep_enabled={}, port={}, stream_buffer={}",
        config.cache_ttl_ms,
        config.sweep_interval_ms,
        config.sweep_enabled,
        config.server_port,
        config.stream_buffer
    );

    let store = open_store(&config)?;
    info!(entries = store.len(), "Store ready");

    let state = AppState::from_config(&config, Arc::new(store));

    let sweep_handle = if config.sweep_enabled {
        Some(spawn_sweep_task(state.cache.clone(), config.sweep_interval()))
    } else {
        info!("Cache sweep task disabled");
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<MemoryStore> {
    let store = match &config.data_file {
        Some(path) => MemoryStore::from_json_file(path)
            .with_context(|| format!("failed to load data file {}", path.display()))?,
        None => MemoryStore::new(),
    };

    if config.seed_demo_data {
        store
            .extend(seed::demo_entries(
                config.demo_seed.unwrap_or_else(|| fastrand::u64(..)),
                chrono::Utc::now(),
            ))
            .context("failed to seed demo data")?;
        info!(entries = seed::DEMO_ENTRY_COUNT, "Seeded demo data");
    }

    Ok(store)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Cache sweep task aborted");
    }
}
