use super::*;

use crate::booking::lifecycle::create_booking;
use crate::db::models::{Coupon, DiscountKind};
use crate::db::repository::CouponRepository;
use crate::utils::AppError;

fn coupon(code: &str, kind: DiscountKind, value: f64, min_order: f64) -> Coupon {
    Coupon {
        id: None,
        code: code.to_string(),
        vendor: None,
        discount_kind: kind,
        discount_value: value,
        max_discount_amount: None,
        min_order_amount: min_order,
        usage_limit: None,
        used_count: 0,
        one_time_use: false,
        used_by: vec![],
        is_active: true,
        valid_until: None,
    }
}

async fn seed_carted_coupon(
    state: &ServerState,
    user: &RecordId,
    vendor: &RecordId,
    coupon: Coupon,
    cart_value: f64,
) -> (Cart, Coupon) {
    let created = CouponRepository::new(state.get_db())
        .create(coupon)
        .await
        .unwrap();

    let carts = CartRepository::new(state.get_db());
    let mut cart = build_cart(
        user,
        vendor,
        ServiceType::Delivery,
        vec![cart_item("dal", "Dal Makhani", cart_value, 1)],
    );
    cart.coupon_code = Some(created.code.clone());
    cart.coupon = created.id.clone();
    let cart = carts.create(cart).await.unwrap();
    (cart, created)
}

#[tokio::test]
async fn below_minimum_coupon_fails_the_booking_and_strips_the_cart() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    // Cart total 400, coupon requires 500.
    let (cart, _) = seed_carted_coupon(
        &state,
        &user,
        &vendor,
        coupon("SAVE50", DiscountKind::Flat, 50.0, 500.0),
        400.0,
    )
    .await;

    let err = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert!(msg.contains("minimum order amount")),
        other => panic!("expected Conflict, got {other:?}"),
    }

    // The coupon was stripped from the cart as a side effect.
    let reloaded = CartRepository::new(state.get_db())
        .find_by_id(cart.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.coupon_code.is_none());
    assert_eq!(reloaded.coupon_discount, 0.0);
    assert_eq!(reloaded.totals.coupon_discount, 0.0);
}

#[tokio::test]
async fn valid_coupon_is_applied_and_marked_used() {
    // Short timeout: the vendor never responds, but coupon effects are
    // visible on the returned view and the stored documents.
    let state = test_state_with_timing(10, 60).await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let (cart, created) = seed_carted_coupon(
        &state,
        &user,
        &vendor,
        coupon("SAVE50", DiscountKind::Flat, 50.0, 100.0),
        400.0,
    )
    .await;

    let outcome = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap();

    assert_eq!(outcome.booking.coupon_code.as_deref(), Some("SAVE50"));
    assert_eq!(outcome.booking.coupon_discount, 50.0);
    assert_eq!(outcome.booking.amount_summary.coupon_discount, 50.0);
    assert_eq!(outcome.booking.amount_summary.grand_total, 350.0);

    // Drift reconciliation persisted the fresh discount on the cart.
    let reloaded = CartRepository::new(state.get_db())
        .find_by_id(cart.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.coupon_discount, 50.0);
    assert_eq!(reloaded.totals.grand_total, 350.0);

    // The redemption was recorded for this user.
    let coupons = CouponRepository::new(state.get_db());
    let stored = coupons.find_by_code("SAVE50").await.unwrap().unwrap();
    assert_eq!(stored.used_count, created.used_count + 1);
    assert!(stored.used_by.contains(&user));
}

#[tokio::test]
async fn one_time_use_coupon_rejects_a_second_redemption() {
    let state = test_state().await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let mut c = coupon("WELCOME", DiscountKind::Percentage, 10.0, 100.0);
    c.one_time_use = true;
    c.used_by = vec![user.clone()];
    seed_carted_coupon(&state, &user, &vendor, c, 400.0).await;

    let err = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert!(msg.contains("already been used")),
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn percentage_discount_respects_the_cap() {
    let state = test_state_with_timing(10, 60).await;
    let user = user_id("asha");
    let vendor = seed_vendor(&state).await;
    let mut c = coupon("BIG20", DiscountKind::Percentage, 20.0, 100.0);
    c.max_discount_amount = Some(60.0);
    seed_carted_coupon(&state, &user, &vendor, c, 400.0).await;

    let outcome = create_booking(&state, &as_user(&user), delivery_request())
        .await
        .unwrap();
    // 20% of 400 is 80, capped at 60.
    assert_eq!(outcome.booking.coupon_discount, 60.0);
    assert_eq!(outcome.booking.amount_summary.grand_total, 340.0);
}
