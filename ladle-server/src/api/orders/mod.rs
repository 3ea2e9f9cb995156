//! Order API Module
//!
//! Vendor-facing order surface: list own orders, respond to pending
//! bookings, advance accepted orders through their status table.

mod handler;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}/respond", put(handler::respond))
        .route("/{id}/status", patch(handler::advance_status))
}
