//! Booking response formatting
//!
//! Pure projection from the persisted booking document to the wire shape:
//! tracking steps computed from the service group and current status,
//! prebook fallback, and rejection details only on rejected orders.

use shared::booking::{BookingView, OrderStatus, RejectionDetails, tracking_steps};

use crate::db::models::Booking;

/// Project a booking document into its wire representation.
pub fn format_booking(booking: &Booking) -> BookingView {
    let group = booking.service_type.group();

    let rejection_details = (booking.order_status == OrderStatus::Rejected).then(|| {
        RejectionDetails {
            reason: booking.rejection_reason.clone(),
            suggested_time: booking.suggested_time.clone(),
            modified_items: booking.modified_items.clone(),
            has_partial_rejection: !booking.modified_items.is_empty(),
            has_time_suggestion: booking.suggested_time.is_some(),
        }
    });

    BookingView {
        id: booking
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        user_id: booking.user.to_string(),
        vendor_id: booking.vendor.to_string(),
        service_type: booking.service_type.display_name().to_string(),
        service_group: group,
        is_prebook: booking
            .is_prebook
            .unwrap_or_else(|| booking.cart_snapshot.has_prebook_item()),
        service_details: booking.service_details.clone(),
        cart_snapshot: booking.cart_snapshot.clone(),
        amount_summary: booking.amount_summary.clone(),
        notes: booking.notes.clone(),
        coupon_code: booking.coupon_code.clone(),
        coupon_discount: booking.coupon_discount,
        order_status: booking.order_status,
        payment_status: booking.payment_status,
        payment_details: booking.payment_details.clone(),
        vendor_response_at: booking.vendor_response_at.clone(),
        rejection_details,
        tracking_steps: tracking_steps(group, booking.order_status),
        created_at: booking.created_at.clone(),
        updated_at: booking.updated_at.clone(),
    }
}
