//! Order API Handlers (vendor side)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::booking::BookingView;
use surrealdb::RecordId;

use crate::auth::CurrentVendor;
use crate::booking::lifecycle::map_repo;
use crate::booking::{
    RespondOutcome, advance_booking_status, format_booking, respond_to_booking,
};
use crate::core::ServerState;
use crate::db::models::{RespondAction, RespondRequest};
use crate::db::repository::BookingRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

fn parse_vendor_id(vendor: &CurrentVendor) -> AppResult<RecordId> {
    vendor.id.parse().map_err(|_| AppError::InvalidToken)
}

/// List the vendor's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    vendor: CurrentVendor,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<BookingView>>>> {
    let vendor_id = parse_vendor_id(&vendor)?;
    let repo = BookingRepository::new(state.get_db());
    let bookings = repo
        .list_for_vendor(&vendor_id, query.limit, query.offset)
        .await
        .map_err(map_repo)?;
    let views = bookings.iter().map(format_booking).collect();
    Ok(ok(views))
}

/// Accept or reject a pending order
pub async fn respond(
    State(state): State<ServerState>,
    vendor: CurrentVendor,
    Path(id): Path<String>,
    Json(payload): Json<RespondRequest>,
) -> AppResult<Json<AppResponse<RespondOutcome>>> {
    let action = payload.action;
    let outcome = respond_to_booking(&state, &vendor, &id, payload).await?;
    let message = match action {
        RespondAction::Accept => "Order accepted",
        RespondAction::Reject => "Order rejected",
    };
    Ok(ok_with_message(outcome, message))
}

/// Advance an accepted order one step through its status table
pub async fn advance_status(
    State(state): State<ServerState>,
    vendor: CurrentVendor,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<BookingView>>> {
    let view = advance_booking_status(&state, &vendor, &id).await?;
    let message = format!("Order status updated to {}", view.order_status);
    Ok(ok_with_message(view, message))
}
