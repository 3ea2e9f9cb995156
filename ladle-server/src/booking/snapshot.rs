//! Cart resolution and snapshot freeze
//!
//! Resolves which cart a booking should be built from (the shared-cart
//! link wins over the user's own cart) and freezes it into an immutable
//! by-value copy.

use shared::booking::{CartSnapshot, SnapshotAddOn, SnapshotCustomization, SnapshotItem};
use surrealdb::RecordId;

use crate::db::models::Cart;
use crate::db::repository::{CartRepository, RepoResult};
use crate::utils::now_rfc3339;

/// Resolve the cart a booking should be built from.
///
/// Preference order: the user's connected cart if one is linked, else the
/// user's own cart if it has items, else none. A connected link pointing
/// at a deleted cart is cleared as a side effect and resolves to none.
pub async fn resolve_bookable_cart(
    carts: &CartRepository,
    user: &RecordId,
) -> RepoResult<Option<Cart>> {
    let Some(own) = carts.find_by_user(user).await? else {
        return Ok(None);
    };

    if let Some(link) = own.connected_cart.clone() {
        match carts.find_by_id(&link).await? {
            Some(connected) => return Ok(Some(connected)),
            None => {
                // Stale link: the shared cart was deleted out from under us.
                if let Some(own_id) = &own.id {
                    carts.clear_connected_link(own_id).await?;
                    tracing::warn!(cart = %own_id, "Cleared stale connected-cart link");
                }
                return Ok(None);
            }
        }
    }

    if own.items.is_empty() {
        Ok(None)
    } else {
        Ok(Some(own))
    }
}

/// Freeze a cart into an immutable snapshot.
///
/// Every customization and add-on is copied by value so later edits to
/// the live cart (or the food catalog) never reach the booked order.
pub fn freeze(cart: &Cart) -> CartSnapshot {
    let items = cart
        .items
        .iter()
        .map(|item| SnapshotItem {
            food_id: item.food.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            item_type: item.item_type.clone(),
            quantity: item.quantity,
            base_price: item.base_price,
            discount_price: item.discount_price,
            effective_price: item.effective_price(),
            customizations: item
                .customizations
                .iter()
                .map(|c| SnapshotCustomization {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    price: c.price,
                    quantity: c.quantity,
                })
                .collect(),
            add_ons: item
                .add_ons
                .iter()
                .map(|a| SnapshotAddOn {
                    id: a.id.clone(),
                    name: a.name.clone(),
                    price: a.price,
                    quantity: a.quantity,
                })
                .collect(),
            packing_charge: item.packing_charge,
            is_prebook: item.is_prebook,
            line_total: item.line_total(),
            notes: item.notes.clone(),
        })
        .collect();

    CartSnapshot {
        items,
        totals: cart.totals.clone(),
        captured_at: now_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CartAddOn, CartItem};
    use shared::booking::CartTotals;

    fn cart_with_item() -> Cart {
        Cart {
            id: None,
            user: ("user", "u1").into(),
            connected_cart: None,
            vendor: Some(("vendor", "v1").into()),
            service_type: None,
            items: vec![CartItem {
                food: ("food", "biryani").into(),
                name: "Veg Biryani".to_string(),
                image: None,
                item_type: Some("veg".to_string()),
                quantity: 2,
                base_price: 180.0,
                discount_price: 20.0,
                customizations: vec![],
                add_ons: vec![CartAddOn {
                    id: "raita".to_string(),
                    name: "Raita".to_string(),
                    price: 30.0,
                    quantity: 1,
                }],
                packing_charge: 10.0,
                is_prebook: false,
                notes: None,
            }],
            coupon_code: None,
            coupon: None,
            coupon_discount: 0.0,
            totals: CartTotals::default(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn freeze_copies_lines_by_value() {
        let mut cart = cart_with_item();
        cart.recalculate_totals();
        let snapshot = freeze(&cart);

        // Mutate the live cart after the freeze.
        cart.items[0].quantity = 9;
        cart.items[0].add_ons[0].price = 999.0;
        cart.items[0].name = "Renamed".to_string();

        let line = &snapshot.items[0];
        assert_eq!(line.quantity, 2);
        assert_eq!(line.name, "Veg Biryani");
        assert_eq!(line.add_ons[0].price, 30.0);
        assert_eq!(line.effective_price, 160.0);
        // 2 * (160 + 30) + 10 packing
        assert_eq!(line.line_total, 390.0);
    }

    #[test]
    fn freeze_carries_the_cart_totals() {
        let mut cart = cart_with_item();
        cart.recalculate_totals();
        let snapshot = freeze(&cart);
        assert_eq!(snapshot.totals, cart.totals);
        assert_eq!(snapshot.totals.item_count, 2);
    }
}
