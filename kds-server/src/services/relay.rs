//! StatusRelay — write-through status transitions
//!
//! The relay forwards every requested transition to the order service and
//! never judges legality locally; rejection is the backend's call. The one
//! piece of coupling it owns: a transition confirmed as READY produces
//! exactly one downstream event, and a failed transition produces none.

use chrono::Utc;
use std::sync::Arc;

use shared::{ActorContext, OrderSnapshot, OrderStatus, ReadyEvent};

use crate::services::publisher::ReadyEventPublisher;
use crate::upstream::{OrderBackend, UpstreamError};

pub struct StatusRelay {
    backend: Arc<dyn OrderBackend>,
    publisher: ReadyEventPublisher,
}

impl StatusRelay {
    pub fn new(backend: Arc<dyn OrderBackend>, publisher: ReadyEventPublisher) -> Self {
        Self { backend, publisher }
    }

    /// Relay a status transition to the order service
    ///
    /// Returns the snapshot exactly as the backend confirmed it. Any upstream
    /// failure aborts the whole operation and no event is published. After a
    /// confirmed READY transition, publish problems are logged and swallowed:
    /// the backend's state is authoritative and already changed.
    pub async fn set_status(
        &self,
        order_id: i64,
        target: OrderStatus,
        actor: &ActorContext,
    ) -> Result<OrderSnapshot, UpstreamError> {
        tracing::info!(
            order_id,
            status = %target,
            user_id = actor.user_id.as_deref().unwrap_or("-"),
            table_id = actor.table_id.as_deref().unwrap_or("-"),
            "Relaying status transition to order service"
        );

        let is_ready = target == OrderStatus::Ready;
        let snapshot = self.backend.patch_status(order_id, target, actor).await?;

        if is_ready {
            let event = ReadyEvent::from_snapshot(&snapshot, Utc::now());
            self.publisher.publish(event);
        }

        Ok(snapshot)
    }
}
