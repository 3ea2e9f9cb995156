//! Cart Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Cart;

const TABLE: &str = "cart";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the user's own cart
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Option<Cart>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE user = $user LIMIT 1")
            .bind(("user", user.clone()))
            .await?;
        let carts: Vec<Cart> = result.take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Find cart by record id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Cart>> {
        let cart: Option<Cart> = self.base.db().select(id.clone()).await?;
        Ok(cart)
    }

    /// Create a cart (id assigned by the store)
    pub async fn create(&self, cart: Cart) -> RepoResult<Cart> {
        let created: Option<Cart> = self.base.db().create(TABLE).content(cart).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart".to_string()))
    }

    /// Persist the full cart document
    pub async fn save(&self, cart: Cart) -> RepoResult<Cart> {
        let id = cart
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Cart has no id".to_string()))?;
        let updated: Option<Cart> = self.base.db().update(id).content(cart).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update cart".to_string()))
    }

    /// Drop a stale connected-cart link (the shared cart was deleted)
    pub async fn clear_connected_link(&self, cart_id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET connected_cart = NONE")
            .bind(("id", cart_id.clone()))
            .await?;
        Ok(())
    }
}
