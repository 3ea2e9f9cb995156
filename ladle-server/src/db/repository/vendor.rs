//! Vendor Repository
//!
//! Lookup-only collaborator for the booking flow.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Vendor;

const TABLE: &str = "vendor";

#[derive(Clone)]
pub struct VendorRepository {
    base: BaseRepository,
}

impl VendorRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find vendor by record id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Vendor>> {
        let vendor: Option<Vendor> = self.base.db().select(id.clone()).await?;
        Ok(vendor)
    }

    /// Create a vendor (id assigned by the store)
    pub async fn create(&self, vendor: Vendor) -> RepoResult<Vendor> {
        let created: Option<Vendor> = self.base.db().create(TABLE).content(vendor).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create vendor".to_string()))
    }
}
