//! Coupon Model
//!
//! Coupon CRUD lives elsewhere; the booking flow consumes coupons as a
//! capability: validate at booking time, apply the discount, mark used.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Discount kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Flat amount off
    Flat,
    /// Percentage of the order amount, capped at `max_discount_amount`
    Percentage,
}

/// Coupon document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub code: String,
    /// When set, the coupon is only valid for this vendor's orders
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub vendor: Option<RecordId>,
    pub discount_kind: DiscountKind,
    pub discount_value: f64,
    pub max_discount_amount: Option<f64>,
    #[serde(default)]
    pub min_order_amount: f64,
    /// Total redemptions allowed across all users (None = unlimited)
    pub usage_limit: Option<i64>,
    #[serde(default)]
    pub used_count: i64,
    /// One redemption per user
    #[serde(default)]
    pub one_time_use: bool,
    /// Users who have redeemed (enforces one_time_use)
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub used_by: Vec<RecordId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// RFC 3339 expiry, if any
    pub valid_until: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Coupon {
    /// Discount for a given order amount (assumes the coupon is valid)
    pub fn discount_for(&self, order_amount: f64) -> f64 {
        match self.discount_kind {
            DiscountKind::Flat => self.discount_value.min(order_amount),
            DiscountKind::Percentage => {
                let raw = order_amount * self.discount_value / 100.0;
                match self.max_discount_amount {
                    Some(cap) => raw.min(cap),
                    None => raw,
                }
            }
        }
    }
}
