use super::*;

use shared::booking::StreamEvent;

use crate::booking::advance::advance_booking_status;
use crate::utils::AppError;

#[tokio::test]
async fn dinein_chain_advances_one_step_at_a_time() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let booking = seed_booking(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        OrderStatus::Accepted,
        PaymentStatus::Completed,
    )
    .await;
    let id = booking_id_of(&booking);
    let caller = as_vendor(&vendor);

    let view = advance_booking_status(&state, &caller, &id).await.unwrap();
    assert_eq!(view.order_status, OrderStatus::Preparing);

    let view = advance_booking_status(&state, &caller, &id).await.unwrap();
    assert_eq!(view.order_status, OrderStatus::Served);

    let view = advance_booking_status(&state, &caller, &id).await.unwrap();
    assert_eq!(view.order_status, OrderStatus::Completed);

    // Completed is terminal.
    let err = advance_booking_status(&state, &caller, &id).await.unwrap_err();
    assert!(matches!(err, AppError::State(_)));
}

#[tokio::test]
async fn delivery_group_uses_out_for_delivery() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let booking = seed_booking(
        &state,
        &user,
        &vendor,
        ServiceType::Delivery,
        OrderStatus::Preparing,
        PaymentStatus::Completed,
    )
    .await;

    let view = advance_booking_status(&state, &as_vendor(&vendor), &booking_id_of(&booking))
        .await
        .unwrap();
    assert_eq!(view.order_status, OrderStatus::OutForDelivery);
}

#[tokio::test]
async fn pickup_maps_to_the_takeaway_table() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let booking = seed_booking(
        &state,
        &user,
        &vendor,
        ServiceType::Pickup,
        OrderStatus::Preparing,
        PaymentStatus::Completed,
    )
    .await;

    let view = advance_booking_status(&state, &as_vendor(&vendor), &booking_id_of(&booking))
        .await
        .unwrap();
    assert_eq!(view.order_status, OrderStatus::ReadyForPickup);
}

#[tokio::test]
async fn payment_gate_blocks_and_never_mutates() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let booking = seed_booking(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        OrderStatus::Accepted,
        PaymentStatus::Pending,
    )
    .await;
    let id = booking_id_of(&booking);

    let err = advance_booking_status(&state, &as_vendor(&vendor), &id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::State(_)));

    let unchanged = BookingRepository::new(state.get_db())
        .find_by_id(&id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.order_status, OrderStatus::Accepted);
}

#[tokio::test]
async fn pending_cannot_be_advanced() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let booking = seed_booking(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        OrderStatus::Pending,
        PaymentStatus::Pending,
    )
    .await;

    let err = advance_booking_status(&state, &as_vendor(&vendor), &booking_id_of(&booking))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::State(_)));
}

#[tokio::test]
async fn terminal_states_have_no_recovery_path() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;

    for status in [OrderStatus::Rejected, OrderStatus::Timeout] {
        let booking = seed_booking(
            &state,
            &user,
            &vendor,
            ServiceType::DineIn,
            status,
            PaymentStatus::Completed,
        )
        .await;
        let err = advance_booking_status(&state, &as_vendor(&vendor), &booking_id_of(&booking))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::State(_)));
    }
}

#[tokio::test]
async fn foreign_vendor_cannot_advance() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let other_vendor = seed_vendor(&state).await;
    let booking = seed_booking(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        OrderStatus::Accepted,
        PaymentStatus::Completed,
    )
    .await;

    let err = advance_booking_status(&state, &as_vendor(&other_vendor), &booking_id_of(&booking))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn advance_pushes_a_status_update_to_subscribers() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let booking = seed_booking(
        &state,
        &user,
        &vendor,
        ServiceType::DineIn,
        OrderStatus::Accepted,
        PaymentStatus::Completed,
    )
    .await;
    let id = booking_id_of(&booking);

    let mut rx = state.broadcaster.subscribe(&id);
    advance_booking_status(&state, &as_vendor(&vendor), &id)
        .await
        .unwrap();

    match rx.recv().await.unwrap() {
        StreamEvent::StatusUpdate {
            order_status,
            tracking_steps,
            ..
        } => {
            assert_eq!(order_status, OrderStatus::Preparing);
            let active: Vec<_> = tracking_steps.iter().filter(|s| s.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].status, OrderStatus::Preparing);
        }
        other => panic!("expected StatusUpdate, got {other:?}"),
    }
}
