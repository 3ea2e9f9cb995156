//! Booking Repository
//!
//! All booking mutations are conditional updates so concurrent writers
//! (the creator's timeout sweep, the vendor's respond/advance calls)
//! cannot clobber each other — the record's own read/write consistency
//! is the only ordering between them.

use shared::booking::{ModifiedItemView, OrderStatus, PaymentDetailsView};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Booking;

const TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new booking (id assigned by the store)
    pub async fn create(&self, booking: Booking) -> RepoResult<Booking> {
        let created: Option<Booking> = self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// Find booking by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let booking: Option<Booking> = self.base.db().select(thing).await?;
        Ok(booking)
    }

    /// Find booking by id, visible only to its owning user
    pub async fn find_by_id_for_user(
        &self,
        id: &str,
        user: &RecordId,
    ) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE id = $id AND user = $user LIMIT 1")
            .bind(("id", thing))
            .bind(("user", user.clone()))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Find booking by id, visible only to its owning vendor
    pub async fn find_by_id_for_vendor(
        &self,
        id: &str,
        vendor: &RecordId,
    ) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE id = $id AND vendor = $vendor LIMIT 1")
            .bind(("id", thing))
            .bind(("vendor", vendor.clone()))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// List a vendor's bookings, newest first
    pub async fn list_for_vendor(
        &self,
        vendor: &RecordId,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking WHERE vendor = $vendor ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("vendor", vendor.clone()))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Accept a pending booking owned by `vendor`.
    ///
    /// Returns None when the booking does not exist, is not owned by the
    /// vendor, or already left `pending` — indistinguishable by design.
    pub async fn respond_accept(
        &self,
        id: &str,
        vendor: &RecordId,
        now: String,
    ) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET order_status = 'accepted', vendor_response_at = $now, updated_at = $now \
                 WHERE vendor = $vendor AND order_status = 'pending' RETURN AFTER",
            )
            .bind(("id", thing))
            .bind(("vendor", vendor.clone()))
            .bind(("now", now))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Reject a pending booking owned by `vendor`, attaching the
    /// validated rejection facets.
    pub async fn respond_reject(
        &self,
        id: &str,
        vendor: &RecordId,
        rejection_reason: Option<String>,
        suggested_time: Option<String>,
        modified_items: Vec<ModifiedItemView>,
        now: String,
    ) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET order_status = 'rejected', vendor_response_at = $now, updated_at = $now, \
                 rejection_reason = $reason, suggested_time = $suggested, modified_items = $modified \
                 WHERE vendor = $vendor AND order_status = 'pending' RETURN AFTER",
            )
            .bind(("id", thing))
            .bind(("vendor", vendor.clone()))
            .bind(("reason", rejection_reason))
            .bind(("suggested", suggested_time))
            .bind(("modified", modified_items))
            .bind(("now", now))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Advance `from → to`, conditioned on the status still being `from`.
    pub async fn advance_status(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
        now: String,
    ) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET order_status = $to, updated_at = $now \
                 WHERE order_status = $from RETURN AFTER",
            )
            .bind(("id", thing))
            .bind(("from", from))
            .bind(("to", to))
            .bind(("now", now))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Transition a still-pending booking to `timeout`.
    ///
    /// The `WHERE order_status = 'pending'` guard is the one mandatory
    /// optimistic-concurrency check: a vendor decision landing in the
    /// same instant must win over the timeout sweep.
    pub async fn mark_timeout_if_pending(&self, id: &str, now: String) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET order_status = 'timeout', updated_at = $now \
                 WHERE order_status = 'pending' RETURN AFTER",
            )
            .bind(("id", thing))
            .bind(("now", now))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(!bookings.is_empty())
    }

    /// Record a payment confirmation, conditioned on `accepted` status
    /// and a still-pending payment.
    pub async fn confirm_payment(
        &self,
        id: &str,
        details: PaymentDetailsView,
        now: String,
    ) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET payment_status = 'completed', payment_details = $details, updated_at = $now \
                 WHERE order_status = 'accepted' AND payment_status = 'pending' RETURN AFTER",
            )
            .bind(("id", thing))
            .bind(("details", details))
            .bind(("now", now))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Hard delete (timeout bookings leave no queryable trace)
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", thing))
            .await?;
        Ok(())
    }
}
