//! Coupon reconciliation at booking time
//!
//! A coupon applied to a cart may have gone invalid by the time the user
//! books (expired, usage limit hit, total dropped below the threshold).
//! The reconciler re-runs validation at the booking instant: invalid
//! coupons are stripped from the cart and the booking attempt fails with
//! the validator's reason — never silently booked without the discount.

use surrealdb::RecordId;

use crate::db::models::Cart;
use crate::db::repository::{CartRepository, CouponCheck, CouponRepository};
use crate::utils::{AppError, AppResult};

/// Coupon data to attach to the new booking
#[derive(Debug, Clone)]
pub struct ReconciledCoupon {
    pub code: String,
    pub discount: f64,
    pub coupon_id: RecordId,
}

/// Order amount the coupon rules are checked against: the cart total
/// before the coupon's own discount and before tax.
fn pre_coupon_amount(cart: &Cart) -> f64 {
    let t = &cart.totals;
    t.sub_total + t.customization_total + t.add_on_total + t.packing_charge_total
}

/// Re-validate the cart's coupon and reconcile the cart totals.
///
/// Returns None when the cart carries no coupon. On invalidation the
/// coupon is stripped, totals recomputed and persisted, and the booking
/// fails with a [`AppError::Conflict`] carrying the reason. On success
/// the coupon is marked consumed for this user and any drift between the
/// stored and freshly computed discount is written back to the cart.
pub async fn reconcile_coupon(
    carts: &CartRepository,
    coupons: &CouponRepository,
    cart: &mut Cart,
    user: &RecordId,
    vendor: &RecordId,
) -> AppResult<Option<ReconciledCoupon>> {
    let Some(code) = cart.coupon_code.clone() else {
        return Ok(None);
    };

    let amount = pre_coupon_amount(cart);
    let check = coupons
        .validate(&code, user, amount, vendor)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    match check {
        CouponCheck::Invalid { reason } => {
            cart.remove_coupon();
            carts
                .save(cart.clone())
                .await
                .map_err(|e| AppError::database(e.to_string()))?;
            Err(AppError::conflict(format!("Coupon invalid: {reason}")))
        }
        CouponCheck::Valid { discount, coupon } => {
            let coupon_id = coupon
                .id
                .ok_or_else(|| AppError::internal("Coupon record has no id"))?;

            // Reconcile drift between applied-at-cart-time and now.
            if (cart.coupon_discount - discount).abs() > f64::EPSILON {
                cart.coupon_discount = discount;
                cart.coupon = Some(coupon_id.clone());
                cart.recalculate_totals();
                carts
                    .save(cart.clone())
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?;
            }

            // One-time-use bookkeeping. A failure here must not lose the
            // booking; the redemption is retried by support tooling.
            if let Err(e) = coupons.mark_used(&coupon_id, user).await {
                tracing::warn!(coupon = %coupon_id, error = %e, "Failed to mark coupon used");
            }

            Ok(Some(ReconciledCoupon {
                code,
                discount,
                coupon_id,
            }))
        }
    }
}
