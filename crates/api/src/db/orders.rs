//! Order repository.
//!
//! Orders and their line snapshots live in `orders` / `order_items`.
//! Status, payment method, and return fields are TEXT columns holding the
//! same labels the API serves; parsing them back surfaces as
//! `RepositoryError::DataCorruption` rather than a panic.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vastra_core::{
    Money, OrderId, OrderItemId, OrderStatus, PaymentMethod, ProductId, ReturnKind, ReturnStatus,
    UserId,
};

use super::RepositoryError;
use crate::models::{
    NewOrder, Order, OrderItem, OrderTotals, OrderWithUser, PaymentSnapshot, ReturnRequest,
    ShippingAddress,
};

const ORDER_COLUMNS: &str = r"
    id, user_id, status, payment_method,
    street, city, postal_code, country,
    items_price, tax_price, shipping_price, total_price,
    is_paid, paid_at, is_delivered, delivered_at,
    courier, tracking_id,
    return_kind, return_status, return_reason,
    payment_id, payment_status, payment_update_time, payer_email,
    created_at, updated_at
";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    status: String,
    payment_method: String,
    street: String,
    city: String,
    postal_code: String,
    country: String,
    items_price: Money,
    tax_price: Money,
    shipping_price: Money,
    total_price: Money,
    is_paid: bool,
    paid_at: Option<DateTime<Utc>>,
    is_delivered: bool,
    delivered_at: Option<DateTime<Utc>>,
    courier: Option<String>,
    tracking_id: Option<String>,
    return_kind: Option<String>,
    return_status: String,
    return_reason: Option<String>,
    payment_id: Option<String>,
    payment_status: Option<String>,
    payment_update_time: Option<DateTime<Utc>>,
    payer_email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let payment_method: PaymentMethod = self
            .payment_method
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let return_status: ReturnStatus = self
            .return_status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        let return_request = match (self.return_kind, self.return_reason) {
            (Some(kind), Some(reason)) => Some(ReturnRequest {
                kind: kind
                    .parse::<ReturnKind>()
                    .map_err(RepositoryError::DataCorruption)?,
                status: return_status,
                reason,
            }),
            _ => None,
        };

        let payment_result = match (self.payment_id, self.payment_status, self.payment_update_time)
        {
            (Some(payment_id), Some(status), Some(update_time)) => Some(PaymentSnapshot {
                payment_id,
                status,
                update_time,
                payer_email: self.payer_email,
            }),
            _ => None,
        };

        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            status,
            payment_method,
            items,
            shipping_address: ShippingAddress {
                street: self.street,
                city: self.city,
                postal_code: self.postal_code,
                country: self.country,
            },
            totals: OrderTotals {
                items_price: self.items_price,
                tax_price: self.tax_price,
                shipping_price: self.shipping_price,
                total_price: self.total_price,
            },
            is_paid: self.is_paid,
            paid_at: self.paid_at,
            is_delivered: self.is_delivered,
            delivered_at: self.delivered_at,
            courier: self.courier,
            tracking_id: self.tracking_id,
            return_request,
            payment_result,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Internal row type for order line items.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    name: String,
    image_url: Option<String>,
    size: String,
    color: Option<String>,
    quantity: i32,
    unit_price: Money,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            name: row.name,
            image_url: row.image_url,
            size: row.size,
            color: row.color,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order with its line items in one transaction.
    ///
    /// `status` is the initial lifecycle status decided by the caller
    /// (`Processing` for COD, `Payment Pending` for online orders).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: &NewOrder,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r"
            INSERT INTO orders (
                user_id, status, payment_method,
                street, city, postal_code, country,
                items_price, tax_price, shipping_price, total_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ORDER_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(user_id.as_i32())
            .bind(status.to_string())
            .bind(input.payment_method.to_string())
            .bind(&input.shipping_address.street)
            .bind(&input.shipping_address.city)
            .bind(&input.shipping_address.postal_code)
            .bind(&input.shipping_address.country)
            .bind(input.totals.items_price)
            .bind(input.totals.tax_price)
            .bind(input.totals.shipping_price)
            .bind(input.totals.total_price)
            .fetch_one(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let item_row = sqlx::query_as::<_, OrderItemRow>(
                r"
                INSERT INTO order_items (
                    order_id, product_id, name, image_url, size, color, quantity, unit_price
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, order_id, product_id, name, image_url, size, color,
                          quantity, unit_price
                ",
            )
            .bind(row.id)
            .bind(line.product_id.as_i32())
            .bind(&line.name)
            .bind(&line.image_url)
            .bind(&line.size)
            .bind(&line.color)
            .bind(line.quantity)
            .bind(line.unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item_row.into());
        }

        tx.commit().await?;

        row.into_order(items)
    }

    /// Get an order by ID with its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored labels do not parse.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.items_for(&[row.id]).await?;
        let items = items.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_order(items)?))
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored labels do not parse.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(user_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        self.assemble(rows).await
    }

    /// List all orders with the owning user's name, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored labels do not parse.
    pub async fn list_all(&self) -> Result<Vec<OrderWithUser>, RepositoryError> {
        #[derive(Debug, sqlx::FromRow)]
        struct NameRow {
            order_id: i32,
            user_name: String,
        }

        let query = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .fetch_all(self.pool)
            .await?;

        let name_rows = sqlx::query_as::<_, NameRow>(
            r"
            SELECT o.id AS order_id, u.name AS user_name
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ",
        )
        .fetch_all(self.pool)
        .await?;
        let mut names: HashMap<i32, String> = name_rows
            .into_iter()
            .map(|r| (r.order_id, r.user_name))
            .collect();

        let orders = self.assemble(rows).await?;
        Ok(orders
            .into_iter()
            .map(|order| {
                let user_name = names.remove(&order.id.as_i32()).unwrap_or_default();
                OrderWithUser { order, user_name }
            })
            .collect())
    }

    /// Mark an order shipped with courier details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn mark_shipped(
        &self,
        id: OrderId,
        courier: &str,
        tracking_id: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET status = $2, courier = $3, tracking_id = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(OrderStatus::Shipped.to_string())
        .bind(courier)
        .bind(tracking_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Mark an order delivered at the given instant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn mark_delivered(
        &self,
        id: OrderId,
        delivered_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET status = $2, is_delivered = TRUE, delivered_at = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(OrderStatus::Delivered.to_string())
        .bind(delivered_at)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Record a verified payment: snapshot, paid flags, new status, and an
    /// optional payment-method relabel (COD orders paid early become
    /// "Online (originally COD)").
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn mark_paid(
        &self,
        id: OrderId,
        snapshot: &PaymentSnapshot,
        status: OrderStatus,
        relabel: Option<PaymentMethod>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET is_paid = TRUE,
                paid_at = $2,
                status = $3,
                payment_method = COALESCE($4, payment_method),
                payment_id = $5,
                payment_status = $6,
                payment_update_time = $2,
                payer_email = $7,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(snapshot.update_time)
        .bind(status.to_string())
        .bind(relabel.map(|m| m.to_string()))
        .bind(&snapshot.payment_id)
        .bind(&snapshot.status)
        .bind(&snapshot.payer_email)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Attach a return/exchange request to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn set_return_request(
        &self,
        id: OrderId,
        kind: ReturnKind,
        reason: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET return_kind = $2, return_status = $3, return_reason = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(kind.to_string())
        .bind(ReturnStatus::Requested.to_string())
        .bind(reason)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn items_for(
        &self,
        order_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<OrderItem>>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, name, image_url, size, color,
                   quantity, unit_price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            by_order.entry(row.order_id).or_default().push(row.into());
        }
        Ok(by_order)
    }

    async fn assemble(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, RepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut items = self.items_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let lines = items.remove(&row.id).unwrap_or_default();
                row.into_order(lines)
            })
            .collect()
    }
}
