//! Tiered snapshot cache
//!
//! Holds the most recently polled set of active orders. Two tiers:
//!
//! - a shared tier (optional): an expiring cache service shared by all relay
//!   instances, written with a TTL of roughly one polling interval;
//! - a local fallback tier: always present, a whole-snapshot swap inside the
//!   process.
//!
//! The cache is never a source of failure on the read path. Shared-tier
//! errors are logged and treated as a miss; before the first completed poll
//! the cache serves an empty set.

mod shared_tier;

pub use shared_tier::{CacheTierError, HttpSharedTier, SharedTier};

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use shared::OrderSnapshot;

/// Two-tier cache over the active-order snapshot
pub struct TieredCache {
    /// Process-private fallback, replaced wholesale on every write
    local: RwLock<Arc<Vec<OrderSnapshot>>>,
    /// Shared expiring tier, if configured
    shared: Option<Arc<dyn SharedTier>>,
    /// Freshness bound for shared-tier writes
    ttl: Duration,
}

impl TieredCache {
    /// Cache with only the local fallback tier
    pub fn local_only() -> Self {
        Self {
            local: RwLock::new(Arc::new(Vec::new())),
            shared: None,
            ttl: Duration::from_secs(10),
        }
    }

    /// Cache with a shared tier in front of the local fallback
    pub fn with_shared_tier(shared: Arc<dyn SharedTier>, ttl: Duration) -> Self {
        Self {
            local: RwLock::new(Arc::new(Vec::new())),
            shared: Some(shared),
            ttl,
        }
    }

    /// Replace the served snapshot with the result of one completed poll
    ///
    /// The local tier always updates; readers observe either the previous
    /// set or the new one, never a mix. The shared-tier write is best-effort
    /// and must never fail or delay the caller.
    pub async fn write(&self, orders: Vec<OrderSnapshot>) {
        let orders = Arc::new(orders);
        *self.local.write() = Arc::clone(&orders);

        if let Some(shared) = &self.shared {
            if let Err(e) = shared.put(&orders, self.ttl).await {
                tracing::warn!(error = %e, "Failed to update shared cache tier (non-critical)");
            }
        }
    }

    /// Read the current snapshot
    ///
    /// Precedence: shared tier (configured, reachable, non-expired) then
    /// local fallback then empty set. Infallible by contract.
    pub async fn read(&self) -> Arc<Vec<OrderSnapshot>> {
        if let Some(shared) = &self.shared {
            match shared.get().await {
                Ok(Some(orders)) => {
                    tracing::debug!(count = orders.len(), "Serving orders from shared cache tier");
                    return Arc::new(orders);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Shared cache tier read failed, falling back to local");
                }
            }
        }

        let orders = self.local.read().clone();
        tracing::debug!(count = orders.len(), "Serving orders from local fallback tier");
        orders
    }
}

#[cfg(test)]
mod tests {
    use super::shared_tier::MemorySharedTier;
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::{OrderItem, OrderStatus};

    fn order(id: i64) -> OrderSnapshot {
        OrderSnapshot {
            id,
            table_id: 1,
            user_id: 1,
            status: OrderStatus::Created,
            total_amount: Decimal::new(1000, 2),
            created_at: Utc::now(),
            items: vec![OrderItem {
                id: id * 10,
                item_id: 5,
                item_name: "Udon".to_string(),
                quantity: 1,
                unit_price: Decimal::new(1000, 2),
            }],
        }
    }

    #[tokio::test]
    async fn test_empty_before_first_write() {
        let cache = TieredCache::local_only();
        assert!(cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_read_round_trip_local_only() {
        let cache = TieredCache::local_only();
        let orders = vec![order(1), order(2)];

        cache.write(orders.clone()).await;

        assert_eq!(*cache.read().await, orders);
    }

    #[tokio::test]
    async fn test_write_replaces_wholesale() {
        let cache = TieredCache::local_only();
        cache.write(vec![order(1), order(2)]).await;
        cache.write(vec![order(3)]).await;

        let served = cache.read().await;
        assert_eq!(served.len(), 1);
        assert_eq!(served[0].id, 3);

        // An empty poll result is data, not an error: it clears the cache
        cache.write(Vec::new()).await;
        assert!(cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_shared_tier_preferred_when_populated() {
        let tier = Arc::new(MemorySharedTier::new());
        let cache = TieredCache::with_shared_tier(tier.clone(), Duration::from_secs(10));

        cache.write(vec![order(1)]).await;

        // Simulate another instance refreshing the shared tier
        tier.put(&[order(7), order(8)], Duration::from_secs(10))
            .await
            .unwrap();

        let served = cache.read().await;
        assert_eq!(served.iter().map(|o| o.id).collect::<Vec<_>>(), vec![7, 8]);
    }

    #[tokio::test]
    async fn test_shared_tier_miss_falls_back_to_local() {
        let tier = Arc::new(MemorySharedTier::new());
        let cache = TieredCache::with_shared_tier(tier.clone(), Duration::from_secs(10));

        cache.write(vec![order(1)]).await;
        tier.clear();

        let served = cache.read().await;
        assert_eq!(served.len(), 1);
        assert_eq!(served[0].id, 1);
    }

    #[tokio::test]
    async fn test_shared_tier_error_falls_back_without_surfacing() {
        let tier = Arc::new(MemorySharedTier::new());
        let cache = TieredCache::with_shared_tier(tier.clone(), Duration::from_secs(10));

        tier.fail_next_writes(true);
        // Write must still succeed against the local tier
        cache.write(vec![order(1), order(2)]).await;

        tier.fail_next_reads(true);
        let served = cache.read().await;
        assert_eq!(served.len(), 2);
    }
}
