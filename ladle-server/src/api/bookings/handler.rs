//! Booking API Handlers

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream, StreamExt};
use shared::booking::{BookingView, OrderStatus, PaymentDetailsView, PaymentStatus, StreamEvent};
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::booking::lifecycle::map_repo;
use crate::booking::{create_booking, format_booking};
use crate::core::ServerState;
use crate::db::models::{CreateBookingRequest, PaymentConfirmRequest};
use crate::db::repository::BookingRepository;
use crate::utils::{AppError, AppResponse, AppResult, now_rfc3339, ok, ok_with_message};

fn parse_user_id(user: &CurrentUser) -> AppResult<RecordId> {
    user.id.parse().map_err(|_| AppError::InvalidToken)
}

/// Create a booking and wait for the vendor's decision.
///
/// Accepted, rejected and timed-out are all success-class outcomes; the
/// message field tells them apart.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<AppResponse<BookingView>>> {
    let outcome = create_booking(&state, &user, payload).await?;
    Ok(ok_with_message(outcome.booking, outcome.message))
}

/// Get one of the caller's bookings
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<BookingView>>> {
    let user_id = parse_user_id(&user)?;
    let repo = BookingRepository::new(state.get_db());
    let booking = repo
        .find_by_id_for_user(&id, &user_id)
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::not_found("Booking"))?;
    Ok(ok(format_booking(&booking)))
}

/// Record a payment confirmation (trusted client assertion).
pub async fn confirm_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<PaymentConfirmRequest>,
) -> AppResult<Json<AppResponse<BookingView>>> {
    let user_id = parse_user_id(&user)?;
    let repo = BookingRepository::new(state.get_db());

    let booking = repo
        .find_by_id_for_user(&id, &user_id)
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::not_found("Booking"))?;

    if booking.payment_status == PaymentStatus::Completed {
        return Err(AppError::state("Payment is already completed"));
    }
    if booking.order_status != OrderStatus::Accepted {
        return Err(AppError::state(
            "Payment can only be confirmed for an accepted order",
        ));
    }

    let now = now_rfc3339();
    let details = PaymentDetailsView {
        transaction_id: payload.transaction_id,
        provider_reference_id: payload.provider_reference_id,
        amount: payload.amount,
        payment_method: payload.payment_method,
        confirmed_at: Some(now.clone()),
    };

    let updated = repo
        .confirm_payment(&id, details, now)
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::conflict("Payment state changed concurrently; retry"))?;

    tracing::info!(booking = %id, "Payment confirmed");
    Ok(ok_with_message(format_booking(&updated), "Payment recorded"))
}

/// Open a live status stream for one of the caller's bookings.
///
/// First frame is `INITIAL` with the full booking payload; subsequent
/// frames are `STATUS_UPDATE`. Keep-alive comments prevent idle-timeout
/// disconnection. A dropped client is deregistered on the next publish.
pub async fn stream(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let user_id = parse_user_id(&user)?;
    let repo = BookingRepository::new(state.get_db());
    let booking = repo
        .find_by_id_for_user(&id, &user_id)
        .await
        .map_err(map_repo)?
        .ok_or_else(|| AppError::not_found("Booking"))?;

    let rx = state.broadcaster.subscribe(&id);
    let initial = StreamEvent::Initial {
        booking: Box::new(format_booking(&booking)),
    };

    let events = stream::once(async move { initial })
        .chain(stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        }))
        .map(|event| Ok::<_, Infallible>(sse_frame(&event)));

    Ok(Sse::new(events).keep_alive(
        KeepAlive::new().interval(Duration::from_secs(state.config.stream_keep_alive_secs)),
    ))
}

fn sse_frame(event: &StreamEvent) -> Event {
    let frame = Event::default().event(event.frame_type());
    match frame.json_data(event) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize stream event");
            Event::default().event("ERROR").data("{}")
        }
    }
}
