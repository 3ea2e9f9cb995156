//! Coupon Repository
//!
//! Consumed by the booking flow as a capability: validate a code against
//! the current rules, then mark it used. Coupon CRUD is owned elsewhere.

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Coupon;

const TABLE: &str = "coupon";

/// Outcome of re-validating a coupon at booking time
#[derive(Debug, Clone)]
pub enum CouponCheck {
    /// Coupon applies: discount amount and the coupon record
    Valid { discount: f64, coupon: Coupon },
    /// Coupon no longer applies; reason is surfaced to the user
    Invalid { reason: String },
}

#[derive(Clone)]
pub struct CouponRepository {
    base: BaseRepository,
}

impl CouponRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find coupon by code
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM coupon WHERE code = $code LIMIT 1")
            .bind(("code", code.to_string()))
            .await?;
        let coupons: Vec<Coupon> = result.take(0)?;
        Ok(coupons.into_iter().next())
    }

    /// Create a coupon (id assigned by the store)
    pub async fn create(&self, coupon: Coupon) -> RepoResult<Coupon> {
        let created: Option<Coupon> = self.base.db().create(TABLE).content(coupon).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create coupon".to_string()))
    }

    /// Re-run coupon validation against the current rules.
    ///
    /// Order amount is the cart total *before* the coupon discount.
    pub async fn validate(
        &self,
        code: &str,
        user: &RecordId,
        order_amount: f64,
        vendor: &RecordId,
    ) -> RepoResult<CouponCheck> {
        let Some(coupon) = self.find_by_code(code).await? else {
            return Ok(CouponCheck::Invalid {
                reason: format!("Coupon '{code}' does not exist"),
            });
        };

        if !coupon.is_active {
            return Ok(CouponCheck::Invalid {
                reason: format!("Coupon '{code}' is no longer active"),
            });
        }

        if let Some(valid_until) = &coupon.valid_until
            && let Ok(expiry) = chrono::DateTime::parse_from_rfc3339(valid_until)
            && Utc::now() > expiry
        {
            return Ok(CouponCheck::Invalid {
                reason: format!("Coupon '{code}' has expired"),
            });
        }

        if let Some(coupon_vendor) = &coupon.vendor
            && coupon_vendor != vendor
        {
            return Ok(CouponCheck::Invalid {
                reason: format!("Coupon '{code}' is not valid for this vendor"),
            });
        }

        if order_amount < coupon.min_order_amount {
            return Ok(CouponCheck::Invalid {
                reason: format!(
                    "Coupon '{code}' requires a minimum order amount of {}",
                    coupon.min_order_amount
                ),
            });
        }

        if let Some(limit) = coupon.usage_limit
            && coupon.used_count >= limit
        {
            return Ok(CouponCheck::Invalid {
                reason: format!("Coupon '{code}' has reached its usage limit"),
            });
        }

        if coupon.one_time_use && coupon.used_by.contains(user) {
            return Ok(CouponCheck::Invalid {
                reason: format!("Coupon '{code}' has already been used by this account"),
            });
        }

        let discount = coupon.discount_for(order_amount);
        Ok(CouponCheck::Valid { discount, coupon })
    }

    /// Record a redemption for one-time-use and usage-limit enforcement.
    pub async fn mark_used(&self, coupon_id: &RecordId, user: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET used_count += 1, used_by += $user")
            .bind(("id", coupon_id.clone()))
            .bind(("user", user.clone()))
            .await?;
        Ok(())
    }
}
