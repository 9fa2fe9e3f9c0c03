//! Mini LRU soak runner
//!
//! Hammers one shared cache from many tokio tasks, then prints a JSON
//! report and fails if the cache ended up inconsistent.

use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_lru::{run_soak, Config, LruCache};

/// Main entry point for the soak runner.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache with the configured capacity
/// 4. Run the soak workload until done or interrupted
/// 5. Print the report and check consistency
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini LRU soak runner");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, workers={}, ops_per_worker={}, key_space={}, seed={}",
        config.capacity, config.workers, config.ops_per_worker, config.key_space, config.seed
    );

    let cache = Arc::new(
        LruCache::new(config.capacity)
            .with_context(|| format!("LRU_CAPACITY={} is not usable", config.capacity))?,
    );

    let report = tokio::select! {
        report = run_soak(cache, &config) => report?,
        _ = shutdown_signal() => {
            warn!("Soak run interrupted before completion");
            return Ok(());
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize soak report")?
    );

    if !report.consistent {
        bail!("Cache index and recency list diverged during the soak run");
    }

    info!("Soak runner finished");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
