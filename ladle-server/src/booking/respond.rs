//! Vendor respond operation
//!
//! Accept or reject a pending booking. Only valid while the booking is
//! `pending` and owned by the responding vendor; anything else reads as
//! not-found so existence never leaks to the wrong tenant.

use serde::Serialize;
use shared::booking::{BookingView, ModifiedItemView, OrderStatus};
use surrealdb::RecordId;

use crate::auth::CurrentVendor;
use crate::booking::format::format_booking;
use crate::booking::lifecycle::map_repo;
use crate::core::ServerState;
use crate::db::models::{Booking, ModifiedItemRequest, RespondAction, RespondRequest};
use crate::db::repository::BookingRepository;
use crate::utils::validation::{FieldErrors, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::{AppError, AppResult, now_rfc3339};

/// Payment-initiation stub returned with an acceptance. Actual capture
/// happens outside this service; the client confirms via
/// `/payment-confirm`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiation {
    pub required: bool,
    pub amount: f64,
}

/// Respond result: the updated booking, plus the grand total and payment
/// stub on acceptance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondOutcome {
    pub booking: BookingView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInitiation>,
}

/// Validate the proposed quantity reductions against the frozen snapshot.
///
/// Every entry must reference a food id present in the snapshot with a
/// positive updated quantity not exceeding the original line quantity;
/// one bad entry fails the whole request (no partial application).
fn validate_modified_items(
    booking: &Booking,
    items: &[ModifiedItemRequest],
) -> AppResult<Vec<ModifiedItemView>> {
    let mut validated = Vec::with_capacity(items.len());

    for item in items {
        let Some(original_quantity) = booking.cart_snapshot.quantity_of(&item.food_id) else {
            return Err(AppError::conflict(format!(
                "Modified item references food '{}' which is not part of this order",
                item.food_id
            )));
        };

        if item.updated_quantity <= 0 || item.updated_quantity > original_quantity {
            return Err(AppError::conflict(format!(
                "Modified item '{}' has invalid quantity {} (original {})",
                item.food_id, item.updated_quantity, original_quantity
            )));
        }

        let name = booking
            .cart_snapshot
            .items
            .iter()
            .find(|line| line.food_id == item.food_id)
            .map(|line| line.name.clone());

        validated.push(ModifiedItemView {
            food_id: item.food_id.clone(),
            name,
            original_quantity,
            updated_quantity: item.updated_quantity,
            reason: item.reason.clone(),
        });
    }

    Ok(validated)
}

/// Accept or reject a pending booking on behalf of its vendor.
pub async fn respond_to_booking(
    state: &ServerState,
    vendor: &CurrentVendor,
    booking_id: &str,
    req: RespondRequest,
) -> AppResult<RespondOutcome> {
    let vendor_id: RecordId = vendor.id.parse().map_err(|_| AppError::InvalidToken)?;
    let bookings = BookingRepository::new(state.get_db());

    // Same 404 whether the order is absent, foreign, or already decided.
    let booking = bookings
        .find_by_id_for_vendor(booking_id, &vendor_id)
        .await
        .map_err(map_repo)?
        .filter(|b| b.order_status == OrderStatus::Pending)
        .ok_or_else(|| AppError::not_found("Order"))?;

    match req.action {
        RespondAction::Accept => {
            let updated = bookings
                .respond_accept(booking_id, &vendor_id, now_rfc3339())
                .await
                .map_err(map_repo)?
                .ok_or_else(|| AppError::not_found("Order"))?;

            tracing::info!(booking = %booking_id, vendor = %vendor_id, "Booking accepted");

            let grand_total = updated.amount_summary.grand_total;
            Ok(RespondOutcome {
                booking: format_booking(&updated),
                total_amount: Some(grand_total),
                payment: Some(PaymentInitiation {
                    required: true,
                    amount: grand_total,
                }),
            })
        }
        RespondAction::Reject => {
            let mut errs = FieldErrors::new();
            errs.optional_text(req.rejection_reason.as_deref(), "rejectionReason", MAX_NOTE_LEN);
            errs.optional_text(req.suggested_time.as_deref(), "suggestedTime", MAX_SHORT_TEXT_LEN);
            if !errs.is_empty() {
                return Err(AppError::Validation(errs.into_errors()));
            }

            let modified_items = validate_modified_items(&booking, &req.modified_items)?;

            let updated = bookings
                .respond_reject(
                    booking_id,
                    &vendor_id,
                    req.rejection_reason.clone(),
                    req.suggested_time.clone(),
                    modified_items,
                    now_rfc3339(),
                )
                .await
                .map_err(map_repo)?
                .ok_or_else(|| AppError::not_found("Order"))?;

            tracing::info!(booking = %booking_id, vendor = %vendor_id, "Booking rejected");

            Ok(RespondOutcome {
                booking: format_booking(&updated),
                total_amount: None,
                payment: None,
            })
        }
    }
}
