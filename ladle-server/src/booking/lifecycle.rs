//! Booking creation and the synchronous vendor wait
//!
//! `create_booking` persists a `pending` booking, then parks the request
//! task in a sleep-and-re-read loop against the persisted record until
//! the vendor responds or the deadline elapses. The wait is a coarse
//! poll over shared storage, not an in-process condition variable: the
//! vendor's respond call mutates the same record from a completely
//! independent request between polls.

use shared::booking::{BookingView, OrderStatus, PaymentStatus, ServiceDetailsView, ServiceGroup, ServiceType};
use surrealdb::RecordId;
use tokio::time::{Duration, Instant};

use crate::auth::CurrentUser;
use crate::booking::coupon::reconcile_coupon;
use crate::booking::format::format_booking;
use crate::booking::snapshot::{freeze, resolve_bookable_cart};
use crate::core::ServerState;
use crate::db::models::{Booking, CreateBookingRequest};
use crate::db::repository::{
    BookingRepository, CartRepository, CouponRepository, RepoError, VendorRepository,
};
use crate::utils::validation::{
    FieldErrors, MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
};
use crate::utils::{AppError, AppResult, now_rfc3339};

/// Outcome of a booking creation — always a success-class response;
/// the message distinguishes accepted / rejected / timed-out.
#[derive(Debug)]
pub struct BookingOutcome {
    pub booking: BookingView,
    pub message: String,
}

pub(crate) fn map_repo(e: RepoError) -> AppError {
    match e {
        RepoError::NotFound(msg) => AppError::NotFound(msg),
        RepoError::Validation(msg) => AppError::conflict(msg),
        RepoError::Database(msg) => AppError::database(msg),
    }
}

/// Build the service-details object from the request, enforcing the
/// group's required subset. All field errors are reported at once.
pub fn build_service_details(
    group: ServiceGroup,
    service_type: ServiceType,
    req: &CreateBookingRequest,
) -> AppResult<ServiceDetailsView> {
    let mut errs = FieldErrors::new();
    errs.optional_text(req.notes.as_deref(), "notes", MAX_NOTE_LEN);

    let details = match group {
        ServiceGroup::Delivery => {
            errs.require_text(req.address.as_deref(), "address", MAX_ADDRESS_LEN);
            errs.require_text(req.name.as_deref(), "name", MAX_NAME_LEN);
            errs.require_text(req.phone_number.as_deref(), "phoneNumber", MAX_SHORT_TEXT_LEN);
            if req.latitude.is_none() {
                errs.push("latitude", "latitude is required");
            }
            if req.longitude.is_none() {
                errs.push("longitude", "longitude is required");
            }
            ServiceDetailsView {
                address: req.address.clone(),
                latitude: req.latitude,
                longitude: req.longitude,
                name: req.name.clone(),
                phone_number: req.phone_number.clone(),
                ..ServiceDetailsView::default()
            }
        }
        ServiceGroup::DineIn => {
            match req.person_count {
                None => errs.push("personCount", "personCount is required"),
                Some(n) if n <= 0 => {
                    errs.push("personCount", "personCount must be a positive integer")
                }
                Some(_) => {}
            }
            errs.require_text(req.reach_time.as_deref(), "reachTime", MAX_SHORT_TEXT_LEN);
            ServiceDetailsView {
                person_count: req.person_count,
                reach_time: req.reach_time.clone(),
                ..ServiceDetailsView::default()
            }
        }
        ServiceGroup::Takeaway => {
            errs.require_text(req.reach_time.as_deref(), "reachTime", MAX_SHORT_TEXT_LEN);
            if service_type == ServiceType::CarDineIn {
                errs.require_text(
                    req.vehicle_details.as_deref(),
                    "vehicleDetails",
                    MAX_SHORT_TEXT_LEN,
                );
            }
            ServiceDetailsView {
                reach_time: req.reach_time.clone(),
                vehicle_details: req.vehicle_details.clone(),
                ..ServiceDetailsView::default()
            }
        }
    };

    if errs.is_empty() {
        Ok(details)
    } else {
        Err(AppError::Validation(errs.into_errors()))
    }
}

/// Create a booking and wait synchronously for the vendor's decision.
pub async fn create_booking(
    state: &ServerState,
    user: &CurrentUser,
    req: CreateBookingRequest,
) -> AppResult<BookingOutcome> {
    // 1. Service type must be a recognized canonical value.
    let service_type = ServiceType::parse(&req.service_type)
        .map_err(|e| AppError::validation("serviceType", e.to_string()))?;
    let group = service_type.group();

    let service_details = build_service_details(group, service_type, &req)?;

    let user_id: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::InvalidToken)?;

    let db = state.get_db();
    let carts = CartRepository::new(db.clone());
    let vendors = VendorRepository::new(db.clone());
    let coupons = CouponRepository::new(db.clone());
    let bookings = BookingRepository::new(db);

    // 2. Resolve the actual cart (connected cart wins).
    let mut cart = resolve_bookable_cart(&carts, &user_id)
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::conflict("Cart is empty"))?;
    if cart.items.is_empty() {
        return Err(AppError::conflict("Cart is empty"));
    }

    // 3. The cart's locked service type must match the request.
    if cart.service_type != Some(service_type) {
        return Err(AppError::conflict(
            "Requested service type does not match the cart's service type",
        ));
    }

    // 4. The cart's vendor must still exist.
    let vendor_id = cart
        .vendor
        .clone()
        .ok_or_else(|| AppError::conflict("Cart has no vendor"))?;
    vendors
        .find_by_id(&vendor_id)
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::not_found("Vendor"))?;

    // 5-6. Re-validate the coupon at the booking instant.
    let reconciled = reconcile_coupon(&carts, &coupons, &mut cart, &user_id, &vendor_id).await?;

    // 7. Persist the pending booking with the frozen cart.
    let now = now_rfc3339();
    let booking = Booking {
        id: None,
        user: user_id,
        vendor: vendor_id,
        service_type,
        is_prebook: None,
        service_details,
        cart_snapshot: freeze(&cart),
        amount_summary: cart.totals.clone(),
        notes: req.notes.clone(),
        coupon_code: reconciled.as_ref().map(|r| r.code.clone()),
        coupon: reconciled.as_ref().map(|r| r.coupon_id.clone()),
        coupon_discount: reconciled.as_ref().map(|r| r.discount).unwrap_or(0.0),
        order_status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_details: None,
        vendor_response_at: None,
        rejection_reason: None,
        suggested_time: None,
        modified_items: vec![],
        created_at: now.clone(),
        updated_at: now,
    };
    let created = bookings.create(booking).await.map_err(map_repo)?;
    let booking_id = created
        .id
        .as_ref()
        .map(ToString::to_string)
        .ok_or_else(|| AppError::internal("Created booking has no id"))?;

    tracing::info!(booking = %booking_id, "Booking created, waiting for vendor response");

    // 8. Poll the persisted record until the vendor responds or the
    //    deadline elapses.
    wait_for_vendor_response(state, &bookings, &booking_id).await
}

/// The sleep-and-re-read loop plus the timeout terminal transition.
async fn wait_for_vendor_response(
    state: &ServerState,
    bookings: &BookingRepository,
    booking_id: &str,
) -> AppResult<BookingOutcome> {
    let poll = Duration::from_millis(state.config.booking_poll_interval_ms.max(1));
    let deadline =
        Instant::now() + Duration::from_millis(state.config.vendor_response_timeout_ms);

    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        // Never sleep past the deadline; each tick re-reads current state.
        tokio::time::sleep(poll.min(deadline - now)).await;

        let current = bookings
            .find_by_id(booking_id)
            .await
            .map_err(map_repo)?
            .ok_or_else(|| AppError::internal("Booking disappeared while awaiting response"))?;

        if current.order_status != OrderStatus::Pending {
            return Ok(outcome_for(current));
        }
    }

    // Deadline elapsed. The conditional update loses against a vendor
    // decision landing in the same instant.
    if bookings
        .mark_timeout_if_pending(booking_id, now_rfc3339())
        .await
        .map_err(map_repo)?
    {
        let timed_out = bookings
            .find_by_id(booking_id)
            .await
            .map_err(map_repo)?
            .ok_or_else(|| AppError::internal("Booking disappeared after timeout"))?;
        let outcome = outcome_for(timed_out);
        // A timed-out booking leaves no queryable trace.
        bookings.delete(booking_id).await.map_err(map_repo)?;
        tracing::info!(booking = %booking_id, "Booking timed out and was removed");
        Ok(outcome)
    } else {
        // The vendor decided at the last instant; honor that decision.
        let decided = bookings
            .find_by_id(booking_id)
            .await
            .map_err(map_repo)?
            .ok_or_else(|| AppError::internal("Booking disappeared after vendor response"))?;
        Ok(outcome_for(decided))
    }
}

/// All three terminal wait outcomes are HTTP-success-class; only the
/// message differs.
fn outcome_for(booking: Booking) -> BookingOutcome {
    let message = match booking.order_status {
        OrderStatus::Accepted => "Booking accepted by the vendor".to_string(),
        OrderStatus::Rejected => "Booking rejected by the vendor".to_string(),
        OrderStatus::Timeout => {
            "Vendor did not respond in time; the booking has timed out".to_string()
        }
        other => format!("Booking is {other}"),
    };
    BookingOutcome {
        booking: format_booking(&booking),
        message,
    }
}
