//! Booking Model
//!
//! The central entity of the ordering lifecycle. Created in `pending`
//! status from a frozen cart; mutated only by the vendor respond /
//! status-advance operations and the payment confirmation.

use serde::{Deserialize, Serialize};
use shared::booking::{
    CartSnapshot, CartTotals, ModifiedItemView, OrderStatus, PaymentDetailsView, PaymentStatus,
    ServiceDetailsView, ServiceType,
};
use surrealdb::RecordId;

use super::serde_helpers;

/// Booking document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub vendor: RecordId,
    /// Immutable after creation; equals the cart's locked service type
    pub service_type: ServiceType,
    /// Explicit prebook flag; when absent the view falls back to the
    /// snapshot lines
    pub is_prebook: Option<bool>,
    pub service_details: ServiceDetailsView,
    /// Frozen cart copy (audit record, never mutated)
    pub cart_snapshot: CartSnapshot,
    /// Copy of the cart totals, authoritative for payment
    pub amount_summary: CartTotals,
    pub notes: Option<String>,
    pub coupon_code: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub coupon: Option<RecordId>,
    #[serde(default)]
    pub coupon_discount: f64,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_details: Option<PaymentDetailsView>,
    pub vendor_response_at: Option<String>,
    // Rejection facets — independent, set only by a reject response
    pub rejection_reason: Option<String>,
    pub suggested_time: Option<String>,
    #[serde(default)]
    pub modified_items: Vec<ModifiedItemView>,
    pub created_at: String,
    pub updated_at: String,
}

// =============================================================================
// API Request Types
// =============================================================================

/// Create booking payload
///
/// The required subset depends on the service group: delivery needs
/// address + coordinates + name + phone; dine-in needs person count +
/// reach time; the takeaway group needs reach time (car dine-in also
/// vehicle details).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_type: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub person_count: Option<i32>,
    pub vehicle_details: Option<String>,
    pub reach_time: Option<String>,
    pub notes: Option<String>,
}

/// Vendor respond action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RespondAction {
    Accept,
    Reject,
}

/// One proposed partial-quantity reduction in a reject response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedItemRequest {
    pub food_id: String,
    pub updated_quantity: i32,
    pub reason: Option<String>,
}

/// Vendor respond payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub action: RespondAction,
    pub rejection_reason: Option<String>,
    pub suggested_time: Option<String>,
    #[serde(default)]
    pub modified_items: Vec<ModifiedItemRequest>,
}

/// Payment confirmation payload (trusted client assertion)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmRequest {
    pub transaction_id: Option<String>,
    pub provider_reference_id: Option<String>,
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
}
