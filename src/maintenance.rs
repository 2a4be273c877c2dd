//! Background cache maintenance
//!
//! Periodically sweeps expired records out of the cache store. The sweep is
//! storage hygiene only; lookups treat expired records as misses whether or
//! not the sweep ever runs.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cache::CacheStore;

/// Configuration for the periodic purge task
#[derive(Debug, Clone)]
pub struct PurgeConfig {
    /// How often to sweep
    pub interval: Duration,
    /// Whether the background task runs at all
    pub enabled: bool,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600), // hourly
            enabled: true,
        }
    }
}

/// Handle for controlling the background purge task
pub struct PurgeHandle {
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl PurgeHandle {
    /// Spawns the periodic purge task over the given store
    ///
    /// The first sweep happens one full interval after spawn, not
    /// immediately. Results are reported through `tracing`.
    pub fn spawn(store: CacheStore, config: PurgeConfig) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            let purge_interval = config.interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(purge_interval);
                // Skip the first tick (immediate)
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            match store.purge_expired() {
                                Ok(0) => {}
                                Ok(count) => info!(count, "purged expired cache records"),
                                Err(err) => warn!(error = %err, "cache purge failed"),
                            }
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            });
        }

        Self { shutdown_tx }
    }

    /// Shuts down the background purge task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}
