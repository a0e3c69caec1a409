//! Shared cache tier
//!
//! The shared tier is a lossy, expiring cache service shared by every relay
//! instance. It is pure cache: an absent, expired, or unreachable value just
//! means "go read the local fallback."

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use shared::OrderSnapshot;

/// Single well-known key holding the current active-order snapshot
pub const ACTIVE_ORDERS_KEY: &str = "kds:active-orders";

/// Shared-tier failure — always non-fatal to the caller
#[derive(Error, Debug)]
#[error("shared cache tier unavailable: {0}")]
pub struct CacheTierError(pub String);

/// Expiring key-value tier shared across relay instances
#[async_trait]
pub trait SharedTier: Send + Sync {
    /// Read the snapshot; `None` on miss or expiry
    async fn get(&self) -> Result<Option<Vec<OrderSnapshot>>, CacheTierError>;

    /// Store the snapshot with a freshness bound
    async fn put(&self, orders: &[OrderSnapshot], ttl: Duration) -> Result<(), CacheTierError>;
}

/// HTTP client for a cache sidecar
///
/// Speaks a minimal get/put protocol:
/// - `GET {base}/cache/{key}` — 200 with a JSON body, 404 on miss/expiry
/// - `PUT {base}/cache/{key}?ttl_secs=N` — JSON body, expires after N seconds
pub struct HttpSharedTier {
    client: Client,
    base_url: String,
}

impl HttpSharedTier {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, CacheTierError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheTierError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn key_url(&self) -> String {
        format!("{}/cache/{}", self.base_url, ACTIVE_ORDERS_KEY)
    }
}

#[async_trait]
impl SharedTier for HttpSharedTier {
    async fn get(&self) -> Result<Option<Vec<OrderSnapshot>>, CacheTierError> {
        let response = self
            .client
            .get(self.key_url())
            .send()
            .await
            .map_err(|e| CacheTierError(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(CacheTierError(format!("status {}", response.status())));
        }

        let orders = response
            .json()
            .await
            .map_err(|e| CacheTierError(format!("failed to parse cached snapshot: {e}")))?;

        Ok(Some(orders))
    }

    async fn put(&self, orders: &[OrderSnapshot], ttl: Duration) -> Result<(), CacheTierError> {
        let response = self
            .client
            .put(self.key_url())
            .query(&[("ttl_secs", ttl.as_secs())])
            .json(orders)
            .send()
            .await
            .map_err(|e| CacheTierError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CacheTierError(format!("status {}", response.status())));
        }

        Ok(())
    }
}

/// In-memory shared tier for tests: controllable content and failure injection
#[cfg(test)]
pub struct MemorySharedTier {
    value: parking_lot::Mutex<Option<Vec<OrderSnapshot>>>,
    fail_reads: std::sync::atomic::AtomicBool,
    fail_writes: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MemorySharedTier {
    pub fn new() -> Self {
        Self {
            value: parking_lot::Mutex::new(None),
            fail_reads: std::sync::atomic::AtomicBool::new(false),
            fail_writes: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn clear(&self) {
        *self.value.lock() = None;
    }

    pub fn fail_next_reads(&self, fail: bool) {
        self.fail_reads
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn fail_next_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
#[async_trait]
impl SharedTier for MemorySharedTier {
    async fn get(&self) -> Result<Option<Vec<OrderSnapshot>>, CacheTierError> {
        if self.fail_reads.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(CacheTierError("injected read failure".into()));
        }
        Ok(self.value.lock().clone())
    }

    async fn put(&self, orders: &[OrderSnapshot], _ttl: Duration) -> Result<(), CacheTierError> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(CacheTierError("injected write failure".into()));
        }
        *self.value.lock() = Some(orders.to_vec());
        Ok(())
    }
}
