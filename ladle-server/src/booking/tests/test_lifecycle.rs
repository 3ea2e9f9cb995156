use super::*;

use shared::booking::OrderStatus;

use crate::booking::lifecycle::create_booking;
use crate::db::models::{RespondAction, RespondRequest};
use crate::booking::respond::respond_to_booking;
use crate::utils::AppError;

fn accept_request() -> RespondRequest {
    RespondRequest {
        action: RespondAction::Accept,
        rejection_reason: None,
        suggested_time: None,
        modified_items: vec![],
    }
}

#[tokio::test]
async fn timed_out_booking_returns_success_and_leaves_no_trace() {
    // 10ms poll, 60ms deadline: the vendor never responds.
    let state = test_state_with_timing(10, 60).await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    seed_cart(
        &state,
        &user,
        &vendor,
        ServiceType::Delivery,
        vec![cart_item("dal", "Dal Makhani", 220.0, 1)],
    )
    .await;

    let outcome = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap();

    assert_eq!(outcome.booking.order_status, OrderStatus::Timeout);
    assert!(outcome.message.contains("timed out"));

    // The record was deleted after the response was formatted.
    let lookup = BookingRepository::new(state.get_db())
        .find_by_id(&outcome.booking.id)
        .await
        .unwrap();
    assert!(lookup.is_none());
}

#[tokio::test]
async fn vendor_acceptance_resolves_the_wait() {
    let state = test_state_with_timing(10, 2_000).await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    seed_cart(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        vec![cart_item("thali", "Veg Thali", 300.0, 2)],
    )
    .await;

    // The vendor responds from an independent task while the creator
    // is parked in its poll loop.
    let responder_state = state.clone();
    let responder_vendor = vendor.clone();
    let responder = tokio::spawn(async move {
        let repo = BookingRepository::new(responder_state.get_db());
        loop {
            tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
            let pending = repo
                .list_for_vendor(&responder_vendor, 10, 0)
                .await
                .unwrap();
            if let Some(booking) = pending
                .iter()
                .find(|b| b.order_status == OrderStatus::Pending)
            {
                let id = booking_id_of(booking);
                respond_to_booking(
                    &responder_state,
                    &as_vendor(&responder_vendor),
                    &id,
                    accept_request(),
                )
                .await
                .unwrap();
                break;
            }
        }
    });

    let outcome = create_booking(&state, &as_user(&user), dinein_request())
        .await
        .unwrap();
    responder.await.unwrap();

    assert_eq!(outcome.booking.order_status, OrderStatus::Accepted);
    assert!(outcome.message.contains("accepted"));
    assert_eq!(outcome.booking.amount_summary.grand_total, 600.0);
    assert!(outcome.booking.vendor_response_at.is_some());

    // Accepted bookings persist and stay visible to their owner.
    let lookup = BookingRepository::new(state.get_db())
        .find_by_id_for_user(&outcome.booking.id, &user)
        .await
        .unwrap();
    assert!(lookup.is_some());
}

#[tokio::test]
async fn snapshot_is_immune_to_later_cart_edits() {
    let state = test_state_with_timing(10, 2_000).await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let cart = seed_cart(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        vec![cart_item("thali", "Veg Thali", 300.0, 2)],
    )
    .await;

    let responder_state = state.clone();
    let responder_vendor = vendor.clone();
    tokio::spawn(async move {
        let repo = BookingRepository::new(responder_state.get_db());
        loop {
            tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
            let pending = repo
                .list_for_vendor(&responder_vendor, 10, 0)
                .await
                .unwrap();
            if let Some(booking) = pending
                .iter()
                .find(|b| b.order_status == OrderStatus::Pending)
            {
                respond_to_booking(
                    &responder_state,
                    &as_vendor(&responder_vendor),
                    &booking_id_of(booking),
                    accept_request(),
                )
                .await
                .unwrap();
                break;
            }
        }
    });

    let outcome = create_booking(&state, &as_user(&user), dinein_request())
        .await
        .unwrap();

    // Mutate the live cart after booking.
    let carts = CartRepository::new(state.get_db());
    let mut live = carts.find_by_id(cart.id.as_ref().unwrap()).await.unwrap().unwrap();
    live.items[0].quantity = 9;
    live.items[0].name = "Renamed Thali".to_string();
    live.recalculate_totals();
    carts.save(live).await.unwrap();

    let booking = BookingRepository::new(state.get_db())
        .find_by_id_for_user(&outcome.booking.id, &user)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.cart_snapshot.items[0].quantity, 2);
    assert_eq!(booking.cart_snapshot.items[0].name, "Veg Thali");
    assert_eq!(booking.amount_summary.grand_total, 600.0);
}

#[tokio::test]
async fn empty_cart_fails_before_any_side_effect() {
    let state = test_state().await;
    let user = user_id("asha");
    seed_vendor(&state).await;
    // No cart at all.
    let err = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn service_type_mismatch_is_rejected() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    seed_cart(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        vec![cart_item("thali", "Veg Thali", 300.0, 1)],
    )
    .await;

    let err = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert!(msg.contains("service type")),
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_service_type_is_rejected_at_the_boundary() {
    let state = test_state().await;
    let user = user_id("asha");
    let mut request = delivery_request();
    request.service_type = "drone-drop".to_string();

    let err = create_booking(&state, &as_user(&user), request)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn missing_delivery_fields_are_reported_together() {
    let state = test_state().await;
    let user = user_id("asha");
    let mut request = delivery_request();
    request.address = None;
    request.phone_number = None;
    request.latitude = None;

    let err = create_booking(&state, &as_user(&user), request)
        .await
        .unwrap_err();
    match err {
        AppError::Validation(fields) => {
            let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
            assert!(names.contains(&"address"));
            assert!(names.contains(&"phoneNumber"));
            assert!(names.contains(&"latitude"));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn vendor_must_still_exist() {
    let state = test_state().await;
    let user = user_id("asha");
    // Cart references a vendor that was never created.
    let ghost: RecordId = ("vendor", "ghost").into();
    seed_cart(
        &state,
        &user,
        &ghost,
        ServiceType::Delivery,
        vec![cart_item("dal", "Dal Makhani", 220.0, 1)],
    )
    .await;

    let err = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn stale_connected_cart_link_is_cleared() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;

    // Own cart with items, but linked to a connected cart that is gone.
    let carts = CartRepository::new(state.get_db());
    let mut cart = build_cart(
        &user,
        &vendor,
        ServiceType::Delivery,
        vec![cart_item("dal", "Dal Makhani", 220.0, 1)],
    );
    cart.connected_cart = Some(("cart", "deleted").into());
    let cart = carts.create(cart).await.unwrap();

    let err = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap_err();
    // No cart resolves, so the booking fails as an empty cart...
    assert!(matches!(err, AppError::Conflict(_)));

    // ...and the stale link was cleared as a side effect.
    let reloaded = carts
        .find_by_id(cart.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.connected_cart.is_none());
}
