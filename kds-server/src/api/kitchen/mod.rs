//! Kitchen API Module
//!
//! REST endpoints consumed by kitchen display clients.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", kitchen_routes())
}

fn kitchen_routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list_orders))
        .route("/orders/{id}/ready", post(handler::mark_ready))
        .route("/orders/{id}/preparing", post(handler::mark_preparing))
        .route("/orders/{id}/created", post(handler::mark_created))
        .route("/health", get(handler::health))
}
