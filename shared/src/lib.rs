//! Shared types for the KDS relay
//!
//! DTOs exchanged with the order service, the downstream event channel,
//! and kitchen display clients.

pub mod event;
pub mod order;
pub mod request;

// Re-exports
pub use event::{ReadyEvent, ReadyEventItem};
pub use order::{OrderItem, OrderSnapshot, OrderStatus};
pub use request::{ActorContext, UpdateStatusRequest};
