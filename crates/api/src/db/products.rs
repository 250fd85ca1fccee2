//! Product repository for catalog and stock operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use vastra_core::{Money, ProductId};

use super::RepositoryError;
use crate::models::{ColorOption, NewProduct, Product, SizeVariant};

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: Option<String>,
    price: Decimal,
    category: String,
    rating: Decimal,
    review_count: i32,
    best_seller: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(
        self,
        sizes: Vec<SizeVariant>,
        colors: Vec<ColorOption>,
        images: Vec<String>,
    ) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            price: Money::new(self.price),
            category: self.category,
            rating: self.rating,
            review_count: self.review_count,
            best_seller: self.best_seller,
            sizes,
            colors,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Internal row type for size-variant queries.
#[derive(Debug, sqlx::FromRow)]
struct SizeRow {
    product_id: i32,
    size: String,
    stock: i32,
}

/// Internal row type for color queries.
#[derive(Debug, sqlx::FromRow)]
struct ColorRow {
    product_id: i32,
    name: String,
    hex: String,
}

/// Internal row type for image queries.
#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    product_id: i32,
    url: String,
}

/// Outcome of a per-size stock decrement attempt.
///
/// Order creation logs the non-success outcomes and proceeds anyway; the
/// order is created regardless of stock sufficiency (documented gap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    /// Stock was decremented by the requested quantity.
    Decremented,
    /// The size exists but had fewer units than requested; stock untouched.
    Insufficient,
    /// The product has no size rows at all; nothing to adjust.
    NoSizeRows,
    /// The requested size does not exist on this product.
    SizeMissing,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by a keyword over name/category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, keyword: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = match keyword {
            Some(kw) => {
                let pattern = format!("%{kw}%");
                sqlx::query_as::<_, ProductRow>(
                    r"
                    SELECT id, name, description, price, category, rating,
                           review_count, best_seller, created_at, updated_at
                    FROM products
                    WHERE name ILIKE $1 OR category ILIKE $1
                    ORDER BY created_at DESC
                    ",
                )
                .bind(pattern)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductRow>(
                    r"
                    SELECT id, name, description, price, category, rating,
                           review_count, best_seller, created_at, updated_at
                    FROM products
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        self.assemble(rows).await
    }

    /// Get a product by ID with its sizes, colors, and images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category, rating,
                   review_count, best_seller, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.assemble(vec![row]).await?.into_iter().next())
    }

    /// Create a product with its size variants, colors, and image URLs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn create(&self, input: &NewProduct) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, description, price, category, best_seller)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, category, rating,
                      review_count, best_seller, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(&input.category)
        .bind(input.best_seller)
        .fetch_one(&mut *tx)
        .await?;

        for variant in &input.sizes {
            sqlx::query(
                r"
                INSERT INTO product_sizes (product_id, size, stock)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(row.id)
            .bind(&variant.size)
            .bind(variant.stock)
            .execute(&mut *tx)
            .await?;
        }

        for color in &input.colors {
            sqlx::query(
                r"
                INSERT INTO product_colors (product_id, name, hex)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(row.id)
            .bind(&color.name)
            .bind(&color.hex)
            .execute(&mut *tx)
            .await?;
        }

        for (position, url) in input.images.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO product_images (product_id, url, position)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(row.id)
            .bind(url)
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.into_product(
            input.sizes.clone(),
            input.colors.clone(),
            input.images.clone(),
        ))
    }

    /// Attempt to decrement stock for one size of a product.
    ///
    /// The decrement itself is an atomic conditional update (`stock >= qty`
    /// guard), so stock never goes negative. The caller decides what a
    /// non-success outcome means; order creation logs it and proceeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn decrement_stock(
        &self,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<StockAdjustment, RepositoryError> {
        let updated = sqlx::query(
            r"
            UPDATE product_sizes
            SET stock = stock - $3
            WHERE product_id = $1 AND size = $2 AND stock >= $3
            ",
        )
        .bind(product_id.as_i32())
        .bind(size)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() > 0 {
            return Ok(StockAdjustment::Decremented);
        }

        // Distinguish why nothing was updated, for logging only.
        let size_counts = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE size = $2)
            FROM product_sizes
            WHERE product_id = $1
            ",
        )
        .bind(product_id.as_i32())
        .bind(size)
        .fetch_one(self.pool)
        .await?;

        match size_counts {
            (0, _) => Ok(StockAdjustment::NoSizeRows),
            (_, 0) => Ok(StockAdjustment::SizeMissing),
            _ => Ok(StockAdjustment::Insufficient),
        }
    }

    /// Get several products by ID. Missing IDs are silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category, rating,
                   review_count, best_seller, created_at, updated_at
            FROM products
            WHERE id = ANY($1)
            ",
        )
        .bind(&raw)
        .fetch_all(self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// Fetch child rows for a set of products and assemble domain types.
    async fn assemble(&self, rows: Vec<ProductRow>) -> Result<Vec<Product>, RepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        let size_rows = sqlx::query_as::<_, SizeRow>(
            r"
            SELECT product_id, size, stock
            FROM product_sizes
            WHERE product_id = ANY($1)
            ORDER BY product_id, size
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let color_rows = sqlx::query_as::<_, ColorRow>(
            r"
            SELECT product_id, name, hex
            FROM product_colors
            WHERE product_id = ANY($1)
            ORDER BY product_id, name
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let image_rows = sqlx::query_as::<_, ImageRow>(
            r"
            SELECT product_id, url
            FROM product_images
            WHERE product_id = ANY($1)
            ORDER BY product_id, position
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut sizes: HashMap<i32, Vec<SizeVariant>> = HashMap::new();
        for r in size_rows {
            sizes.entry(r.product_id).or_default().push(SizeVariant {
                size: r.size,
                stock: r.stock,
            });
        }

        let mut colors: HashMap<i32, Vec<ColorOption>> = HashMap::new();
        for r in color_rows {
            colors.entry(r.product_id).or_default().push(ColorOption {
                name: r.name,
                hex: r.hex,
            });
        }

        let mut images: HashMap<i32, Vec<String>> = HashMap::new();
        for r in image_rows {
            images.entry(r.product_id).or_default().push(r.url);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_product(
                    sizes.remove(&id).unwrap_or_default(),
                    colors.remove(&id).unwrap_or_default(),
                    images.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}
