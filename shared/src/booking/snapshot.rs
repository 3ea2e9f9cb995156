//! Cart snapshot - immutable copy of cart contents at booking time
//!
//! The snapshot is an audit record: every sub-object is copied by value
//! when the booking is created, so later edits to the live cart or the
//! food catalog never reach a booked order.

use serde::{Deserialize, Serialize};

/// Customization copied into a snapshot line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCustomization {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// Add-on copied into a snapshot line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotAddOn {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// One frozen cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotItem {
    /// Food document id at capture time
    pub food_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Food type tag (veg / non-veg / beverage ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub quantity: i32,
    /// Catalog price at capture time
    pub base_price: f64,
    /// Per-unit discount at capture time
    #[serde(default)]
    pub discount_price: f64,
    /// base_price - discount_price
    pub effective_price: f64,
    #[serde(default)]
    pub customizations: Vec<SnapshotCustomization>,
    #[serde(default)]
    pub add_ons: Vec<SnapshotAddOn>,
    #[serde(default)]
    pub packing_charge: f64,
    /// Whether the line was flagged prebook at capture time
    #[serde(default)]
    pub is_prebook: bool,
    /// quantity * (effective_price + customizations + add-ons) + packing
    pub line_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Totals object — authoritative for payment once copied to a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub sub_total: f64,
    #[serde(default)]
    pub add_on_total: f64,
    #[serde(default)]
    pub customization_total: f64,
    #[serde(default)]
    pub packing_charge_total: f64,
    #[serde(default)]
    pub discount_total: f64,
    #[serde(default)]
    pub coupon_discount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub tax_percentage: f64,
    pub grand_total: f64,
    pub item_count: i32,
}

/// Immutable cart copy taken at booking creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<SnapshotItem>,
    pub totals: CartTotals,
    /// Capture timestamp (UTC, RFC 3339)
    pub captured_at: String,
}

impl CartSnapshot {
    /// Whether any captured line was flagged prebook.
    pub fn has_prebook_item(&self) -> bool {
        self.items.iter().any(|i| i.is_prebook)
    }

    /// Original quantity of a food line, if present.
    pub fn quantity_of(&self, food_id: &str) -> Option<i32> {
        self.items
            .iter()
            .find(|i| i.food_id == food_id)
            .map(|i| i.quantity)
    }
}
