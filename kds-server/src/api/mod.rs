//! HTTP API
//!
//! Mechanical surface over the core: route shapes, header extraction, and
//! error-to-status mapping live here, nothing else.

pub mod kitchen;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the application router
pub fn app(state: ServerState) -> Router {
    Router::new()
        .merge(kitchen::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
