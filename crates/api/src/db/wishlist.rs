//! Wishlist repository.
//!
//! The wishlist is a set of (user, product) pairs; adding an existing pair
//! is a no-op rather than an error.

use sqlx::PgPool;

use vastra_core::{ProductId, UserId};

use super::RepositoryError;

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to a user's wishlist. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO wishlist_items (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Remove a product from a user's wishlist. Removing an absent entry is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM wishlist_items
            WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Remove several products from a user's wishlist at once.
    ///
    /// Used after order creation to clear purchased products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove_many(
        &self,
        user_id: UserId,
        product_ids: &[ProductId],
    ) -> Result<(), RepositoryError> {
        if product_ids.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = product_ids.iter().map(|id| id.as_i32()).collect();
        sqlx::query(
            r"
            DELETE FROM wishlist_items
            WHERE user_id = $1 AND product_id = ANY($2)
            ",
        )
        .bind(user_id.as_i32())
        .bind(&ids)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// List a user's wishlisted product IDs, most recently added first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<ProductId>, RepositoryError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r"
            SELECT product_id
            FROM wishlist_items
            WHERE user_id = $1
            ORDER BY added_at DESC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| ProductId::new(id)).collect())
    }
}
