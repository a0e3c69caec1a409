//! Order service boundary
//!
//! The order service is the single source of truth for orders. This module
//! defines the two operations the relay needs from it, plus the error
//! taxonomy the rest of the core is written against.

pub mod client;

pub use client::OrderServiceClient;

use async_trait::async_trait;
use thiserror::Error;

use shared::{ActorContext, OrderSnapshot, OrderStatus};

/// Failures talking to the order service
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, timeout, or 5xx failure — the backend could not answer
    #[error("order service unavailable: {0}")]
    Unavailable(String),

    /// The backend answered, but not in a shape we understand
    #[error("order service protocol error: {0}")]
    Protocol(String),

    /// The backend explicitly refused the requested transition (4xx)
    #[error("order service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Remote operations against the authoritative order service
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Fetch all orders not yet completed, in backend order
    async fn fetch_active(&self) -> Result<Vec<OrderSnapshot>, UpstreamError>;

    /// Request a status transition and return the confirmed snapshot
    async fn patch_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        actor: &ActorContext,
    ) -> Result<OrderSnapshot, UpstreamError>;
}
