//! Vendor status advancement
//!
//! Strict one-step-at-a-time progression through the service group's
//! table. Payment gates the first step out of `accepted`; terminal
//! states admit no recovery. Every accepted advance is pushed to the
//! status broadcaster.

use shared::booking::{BookingView, OrderStatus, PaymentStatus, StreamEvent, tracking_steps};
use surrealdb::RecordId;

use crate::auth::CurrentVendor;
use crate::booking::format::format_booking;
use crate::booking::lifecycle::map_repo;
use crate::core::ServerState;
use crate::db::repository::BookingRepository;
use crate::utils::{AppError, AppResult, now_rfc3339};

/// Advance a booking one step through its group's status table.
pub async fn advance_booking_status(
    state: &ServerState,
    vendor: &CurrentVendor,
    booking_id: &str,
) -> AppResult<BookingView> {
    let vendor_id: RecordId = vendor.id.parse().map_err(|_| AppError::InvalidToken)?;
    let bookings = BookingRepository::new(state.get_db());

    let booking = bookings
        .find_by_id_for_vendor(booking_id, &vendor_id)
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::not_found("Order"))?;

    let status = booking.order_status;

    if status == OrderStatus::Completed {
        return Err(AppError::state("Order is already completed"));
    }
    if status.is_terminal() {
        return Err(AppError::state(format!(
            "Order is {status}; no further status changes are possible"
        )));
    }
    if status == OrderStatus::Pending {
        return Err(AppError::state(
            "Order is awaiting vendor response; accept it before advancing",
        ));
    }
    // Payment gate: nothing moves past `accepted` until payment lands.
    if status == OrderStatus::Accepted && booking.payment_status != PaymentStatus::Completed {
        return Err(AppError::state(
            "Payment is not completed; the order cannot be advanced",
        ));
    }

    let group = booking.service_type.group();
    let next = status
        .next_in_group(group)
        .ok_or_else(|| AppError::state(format!("Order cannot advance from {status}")))?;

    // Conditional on the status we read — a concurrent advance loses.
    let updated = bookings
        .advance_status(booking_id, status, next, now_rfc3339())
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::conflict("Order status changed concurrently; retry"))?;

    tracing::info!(booking = %booking_id, from = %status, to = %next, "Order status advanced");

    // Best-effort push; a slow or dead stream never fails the request.
    state.broadcaster.publish(
        booking_id,
        &StreamEvent::StatusUpdate {
            order_status: updated.order_status,
            tracking_steps: tracking_steps(group, updated.order_status),
            updated_at: updated.updated_at.clone(),
        },
    );

    Ok(format_booking(&updated))
}
