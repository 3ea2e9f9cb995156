use std::sync::Arc;

use shared::booking::{CartTotals, OrderStatus, PaymentStatus, ServiceDetailsView, ServiceType};
use surrealdb::RecordId;

use crate::auth::{CurrentUser, CurrentVendor, JwtService};
use crate::booking::snapshot::freeze;
use crate::core::{Config, ServerState};
use crate::db::DbService;
use crate::db::models::{Booking, Cart, CartItem, CreateBookingRequest, Vendor};
use crate::db::repository::{BookingRepository, CartRepository, VendorRepository};
use crate::stream::StatusBroadcaster;
use crate::utils::now_rfc3339;

mod test_advance;
mod test_coupon;
mod test_lifecycle;

// ========================================================================
// Test state: in-memory store, short poll/timeout windows
// ========================================================================

async fn test_state() -> ServerState {
    test_state_with_timing(10, 2_000).await
}

async fn test_state_with_timing(poll_ms: u64, timeout_ms: u64) -> ServerState {
    let db = DbService::open_in_memory().await.unwrap().db;
    let config = Config::with_overrides("/tmp/ladle-test", poll_ms, timeout_ms);
    ServerState::new(
        config,
        db,
        Arc::new(JwtService::default()),
        Arc::new(StatusBroadcaster::new(8)),
    )
}

// ========================================================================
// Seed helpers
// ========================================================================

fn user_id(key: &str) -> RecordId {
    ("user", key).into()
}

fn as_user(id: &RecordId) -> CurrentUser {
    CurrentUser { id: id.to_string() }
}

fn as_vendor(id: &RecordId) -> CurrentVendor {
    CurrentVendor { id: id.to_string() }
}

async fn seed_vendor(state: &ServerState) -> RecordId {
    let repo = VendorRepository::new(state.get_db());
    let vendor = repo
        .create(Vendor {
            id: None,
            name: "Wok Express".to_string(),
            phone: None,
            address: None,
            is_active: true,
        })
        .await
        .unwrap();
    vendor.id.unwrap()
}

fn cart_item(food_key: &str, name: &str, price: f64, quantity: i32) -> CartItem {
    CartItem {
        food: ("food", food_key).into(),
        name: name.to_string(),
        image: None,
        item_type: None,
        quantity,
        base_price: price,
        discount_price: 0.0,
        customizations: vec![],
        add_ons: vec![],
        packing_charge: 0.0,
        is_prebook: false,
        notes: None,
    }
}

fn build_cart(
    user: &RecordId,
    vendor: &RecordId,
    service_type: ServiceType,
    items: Vec<CartItem>,
) -> Cart {
    let mut cart = Cart {
        id: None,
        user: user.clone(),
        connected_cart: None,
        vendor: Some(vendor.clone()),
        service_type: Some(service_type),
        items,
        coupon_code: None,
        coupon: None,
        coupon_discount: 0.0,
        totals: CartTotals::default(),
        created_at: None,
        updated_at: None,
    };
    cart.recalculate_totals();
    cart
}

async fn seed_cart(
    state: &ServerState,
    user: &RecordId,
    vendor: &RecordId,
    service_type: ServiceType,
    items: Vec<CartItem>,
) -> Cart {
    CartRepository::new(state.get_db())
        .create(build_cart(user, vendor, service_type, items))
        .await
        .unwrap()
}

/// Persist a booking directly in the given state, bypassing the
/// creation wait (for respond/advance tests).
async fn seed_booking(
    state: &ServerState,
    user: &RecordId,
    vendor: &RecordId,
    service_type: ServiceType,
    order_status: OrderStatus,
    payment_status: PaymentStatus,
) -> Booking {
    let cart = build_cart(
        user,
        vendor,
        service_type,
        vec![
            cart_item("paneer", "Paneer Tikka", 250.0, 2),
            cart_item("lassi", "Sweet Lassi", 80.0, 1),
        ],
    );
    let now = now_rfc3339();
    let booking = Booking {
        id: None,
        user: user.clone(),
        vendor: vendor.clone(),
        service_type,
        is_prebook: None,
        service_details: ServiceDetailsView {
            person_count: Some(2),
            reach_time: Some("2026-08-07T19:00:00Z".to_string()),
            ..ServiceDetailsView::default()
        },
        cart_snapshot: freeze(&cart),
        amount_summary: cart.totals.clone(),
        notes: None,
        coupon_code: None,
        coupon: None,
        coupon_discount: 0.0,
        order_status,
        payment_status,
        payment_details: None,
        vendor_response_at: None,
        rejection_reason: None,
        suggested_time: None,
        modified_items: vec![],
        created_at: now.clone(),
        updated_at: now,
    };
    BookingRepository::new(state.get_db())
        .create(booking)
        .await
        .unwrap()
}

fn booking_id_of(booking: &Booking) -> String {
    booking.id.as_ref().unwrap().to_string()
}

// ========================================================================
// Request payloads
// ========================================================================

fn delivery_request() -> CreateBookingRequest {
    CreateBookingRequest {
        service_type: "delivery".to_string(),
        address: Some("12 MG Road, Bengaluru".to_string()),
        latitude: Some(12.9716),
        longitude: Some(77.5946),
        name: Some("Asha".to_string()),
        phone_number: Some("+91-9000000000".to_string()),
        person_count: None,
        vehicle_details: None,
        reach_time: None,
        notes: None,
    }
}

fn dinein_request() -> CreateBookingRequest {
    CreateBookingRequest {
        service_type: "dine-in".to_string(),
        address: None,
        latitude: None,
        longitude: None,
        name: None,
        phone_number: None,
        person_count: Some(2),
        vehicle_details: None,
        reach_time: Some("2026-08-07T19:00:00Z".to_string()),
        notes: None,
    }
}
