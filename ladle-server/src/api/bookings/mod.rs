//! Booking API Module
//!
//! Customer-facing booking surface: creation (with the synchronous
//! vendor wait), lookup, payment confirmation and the live status
//! stream.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Booking router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/payment-confirm", post(handler::confirm_payment))
        .route("/{id}/stream", get(handler::stream))
}
