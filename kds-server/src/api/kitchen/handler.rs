//! Kitchen API Handlers
//!
//! Reads come out of the tiered cache and always succeed, possibly with
//! stale data. Writes go through the status relay; an upstream failure
//! surfaces to the caller because the transition did not happen.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use shared::{ActorContext, OrderSnapshot, OrderStatus};

use crate::core::{Result, ServerState};
use crate::upstream::client::{TABLE_ID_HEADER, USER_ID_HEADER};

/// GET /api/kitchen/orders - Active orders for the kitchen display
///
/// Served from the cache: shared tier if fresh, local fallback otherwise,
/// empty before the first completed poll. Never an error.
pub async fn list_orders(State(state): State<ServerState>) -> Json<Vec<OrderSnapshot>> {
    let orders = state.cache.read().await;
    tracing::debug!(count = orders.len(), "Returning active orders");
    Json((*orders).clone())
}

/// POST /api/kitchen/orders/{id}/ready - Mark an order READY
///
/// On backend confirmation a ready event is published downstream; a failed
/// backend call returns the error and publishes nothing.
pub async fn mark_ready(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<OrderSnapshot>> {
    relay_status(&state, order_id, OrderStatus::Ready, &headers).await
}

/// POST /api/kitchen/orders/{id}/preparing - Mark an order PREPARING
pub async fn mark_preparing(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<OrderSnapshot>> {
    relay_status(&state, order_id, OrderStatus::Preparing, &headers).await
}

/// POST /api/kitchen/orders/{id}/created - Move an order back to CREATED
pub async fn mark_created(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<OrderSnapshot>> {
    relay_status(&state, order_id, OrderStatus::Created, &headers).await
}

/// GET /api/kitchen/health - Liveness check
pub async fn health() -> &'static str {
    "KDS Relay Server is running"
}

async fn relay_status(
    state: &ServerState,
    order_id: i64,
    status: OrderStatus,
    headers: &HeaderMap,
) -> Result<Json<OrderSnapshot>> {
    let actor = actor_from_headers(headers);
    let snapshot = state.relay.set_status(order_id, status, &actor).await?;
    Ok(Json(snapshot))
}

/// Optional caller identity, forwarded opaquely to the order service
fn actor_from_headers(headers: &HeaderMap) -> ActorContext {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    ActorContext::new(header_value(USER_ID_HEADER), header_value(TABLE_ID_HEADER))
}
