//! Cart Model
//!
//! The live, mutable cart a user builds before booking. At booking time
//! the cart is frozen into a [`shared::booking::CartSnapshot`]; the live
//! document keeps changing afterwards without affecting the booking.

use serde::{Deserialize, Serialize};
use shared::booking::{CartTotals, ServiceType};
use surrealdb::RecordId;

use super::serde_helpers;

/// Customization selected on a cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartCustomization {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// Add-on selected on a cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartAddOn {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// One live cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(with = "serde_helpers::record_id")]
    pub food: RecordId,
    pub name: String,
    pub image: Option<String>,
    pub item_type: Option<String>,
    pub quantity: i32,
    pub base_price: f64,
    #[serde(default)]
    pub discount_price: f64,
    #[serde(default)]
    pub customizations: Vec<CartCustomization>,
    #[serde(default)]
    pub add_ons: Vec<CartAddOn>,
    #[serde(default)]
    pub packing_charge: f64,
    #[serde(default)]
    pub is_prebook: bool,
    pub notes: Option<String>,
}

impl CartItem {
    /// base_price - discount_price, floored at zero
    pub fn effective_price(&self) -> f64 {
        (self.base_price - self.discount_price).max(0.0)
    }

    /// Per-line extras (customizations + add-ons), one set per unit
    fn extras_per_unit(&self) -> f64 {
        let customizations: f64 = self
            .customizations
            .iter()
            .map(|c| c.price * c.quantity as f64)
            .sum();
        let add_ons: f64 = self.add_ons.iter().map(|a| a.price * a.quantity as f64).sum();
        customizations + add_ons
    }

    /// quantity * (effective + extras) + packing charge
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * (self.effective_price() + self.extras_per_unit())
            + self.packing_charge
    }
}

/// Cart document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    /// Shared-cart link: when set, bookings resolve through this cart
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub connected_cart: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub vendor: Option<RecordId>,
    /// Locked when the first item is added; must match the booking request
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub coupon_code: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub coupon: Option<RecordId>,
    #[serde(default)]
    pub coupon_discount: f64,
    #[serde(default)]
    pub totals: CartTotals,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Cart {
    /// Recompute the totals object from the current lines.
    ///
    /// `coupon_discount` is carried from the cart's coupon fields; tax is
    /// applied on the discounted subtotal at the stored percentage.
    pub fn recalculate_totals(&mut self) {
        let mut totals = CartTotals {
            tax_percentage: self.totals.tax_percentage,
            ..CartTotals::default()
        };

        for item in &self.items {
            let qty = item.quantity as f64;
            totals.sub_total += qty * item.effective_price();
            totals.customization_total += qty
                * item
                    .customizations
                    .iter()
                    .map(|c| c.price * c.quantity as f64)
                    .sum::<f64>();
            totals.add_on_total += qty
                * item
                    .add_ons
                    .iter()
                    .map(|a| a.price * a.quantity as f64)
                    .sum::<f64>();
            totals.packing_charge_total += item.packing_charge;
            totals.discount_total += qty * item.discount_price;
            totals.item_count += item.quantity;
        }

        totals.coupon_discount = self.coupon_discount;

        let taxable = (totals.sub_total + totals.customization_total + totals.add_on_total
            + totals.packing_charge_total
            - totals.coupon_discount)
            .max(0.0);
        totals.tax_amount = taxable * totals.tax_percentage / 100.0;
        totals.grand_total = taxable + totals.tax_amount;

        self.totals = totals;
    }

    /// Strip an applied coupon and zero its discount contribution.
    pub fn remove_coupon(&mut self) {
        self.coupon_code = None;
        self.coupon = None;
        self.coupon_discount = 0.0;
        self.recalculate_totals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, qty: i32) -> CartItem {
        CartItem {
            food: ("food", "dal").into(),
            name: "Dal Tadka".to_string(),
            image: None,
            item_type: None,
            quantity: qty,
            base_price: price,
            discount_price: 0.0,
            customizations: vec![],
            add_ons: vec![],
            packing_charge: 0.0,
            is_prebook: false,
            notes: None,
        }
    }

    fn cart_with(items: Vec<CartItem>) -> Cart {
        Cart {
            id: None,
            user: ("user", "u1").into(),
            connected_cart: None,
            vendor: Some(("vendor", "v1").into()),
            service_type: None,
            items,
            coupon_code: None,
            coupon: None,
            coupon_discount: 0.0,
            totals: CartTotals::default(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn totals_cover_extras_and_packing() {
        let mut line = item(100.0, 2);
        line.discount_price = 10.0;
        line.packing_charge = 5.0;
        line.add_ons.push(CartAddOn {
            id: "a1".to_string(),
            name: "Extra ghee".to_string(),
            price: 15.0,
            quantity: 1,
        });
        let mut cart = cart_with(vec![line]);
        cart.recalculate_totals();

        assert_eq!(cart.totals.sub_total, 180.0);
        assert_eq!(cart.totals.add_on_total, 30.0);
        assert_eq!(cart.totals.packing_charge_total, 5.0);
        assert_eq!(cart.totals.discount_total, 20.0);
        assert_eq!(cart.totals.item_count, 2);
        assert_eq!(cart.totals.grand_total, 215.0);
    }

    #[test]
    fn remove_coupon_zeroes_discount_and_recomputes() {
        let mut cart = cart_with(vec![item(200.0, 1)]);
        cart.coupon_code = Some("SAVE50".to_string());
        cart.coupon_discount = 50.0;
        cart.recalculate_totals();
        assert_eq!(cart.totals.grand_total, 150.0);

        cart.remove_coupon();
        assert_eq!(cart.coupon_code, None);
        assert_eq!(cart.totals.coupon_discount, 0.0);
        assert_eq!(cart.totals.grand_total, 200.0);
    }
}
