//! OrderPollWorker — recurring fetch-and-replace of the order snapshot
//!
//! Polling is the only way order data enters this service. Each cycle fetches
//! the full active set and replaces the cache wholesale; a failed cycle is
//! skipped and the previous snapshot keeps being served, the next tick is the
//! retry mechanism.
//!
//! Scheduling is fixed-delay: the interval is measured from the completion of
//! one cycle to the start of the next, so a slow cycle pushes the next one out
//! instead of overlapping it. Cycles never run concurrently.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::cache::TieredCache;
use crate::upstream::OrderBackend;

pub struct OrderPollWorker {
    backend: Arc<dyn OrderBackend>,
    cache: Arc<TieredCache>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl OrderPollWorker {
    pub fn new(
        backend: Arc<dyn OrderBackend>,
        cache: Arc<TieredCache>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            backend,
            cache,
            interval,
            shutdown,
        }
    }

    /// Run the poll loop until shutdown
    pub async fn run(self) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            "Order poll worker started"
        );

        loop {
            self.poll_once().await;

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Order poll worker shutting down");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// Execute one poll cycle
    ///
    /// On success the fetched set — empty included — replaces the cache
    /// content. On failure the cache is left untouched.
    pub async fn poll_once(&self) {
        match self.backend.fetch_active().await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "Polled active orders");
                self.cache.write(orders).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Poll cycle failed, serving previous snapshot");
            }
        }
    }
}
