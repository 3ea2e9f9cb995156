//! Booking wire representation
//!
//! `BookingView` is the projection returned by every booking endpoint and
//! carried in stream frames. Computed fields (tracking steps, prebook
//! fallback, conditional rejection details) are filled by the server-side
//! formatter; the types live here so clients can decode them.

use serde::{Deserialize, Serialize};

use super::snapshot::{CartSnapshot, CartTotals};
use super::status::{OrderStatus, PaymentStatus};
use super::tracking::TrackingStep;

/// Service-type-specific booking fields
///
/// Delivery fills address/coordinates/name/phone; dine-in fills
/// person_count/reach_time; the takeaway group fills reach_time (car
/// dine-in additionally vehicle_details).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetailsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reach_time: Option<String>,
}

/// Partial-quantity reduction proposed by the vendor on rejection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedItemView {
    pub food_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub original_quantity: i32,
    pub updated_quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Rejection facets — present on the view only when the order is rejected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RejectionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_time: Option<String>,
    #[serde(default)]
    pub modified_items: Vec<ModifiedItemView>,
    pub has_partial_rejection: bool,
    pub has_time_suggestion: bool,
}

/// Payment details recorded by the payment-confirm endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<String>,
}

/// Full booking projection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: String,
    pub user_id: String,
    pub vendor_id: String,
    /// Canonical display form, e.g. "Car Dine in"
    pub service_type: String,
    pub service_group: super::service_type::ServiceGroup,
    pub is_prebook: bool,
    pub service_details: ServiceDetailsView,
    pub cart_snapshot: CartSnapshot,
    pub amount_summary: CartTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub coupon_discount: f64,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetailsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_response_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_details: Option<RejectionDetails>,
    pub tracking_steps: Vec<TrackingStep>,
    pub created_at: String,
    pub updated_at: String,
}
