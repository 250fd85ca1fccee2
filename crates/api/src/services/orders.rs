//! Order lifecycle service.
//!
//! Owns order creation, the admin ship/deliver transitions, and the
//! post-delivery return window. Stock adjustment during checkout is
//! best-effort: a failed decrement is logged and the order goes through
//! anyway, matching how the storefront has always behaved.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::warn;

use vastra_core::{OrderId, OrderStatus, PaymentMethod, ReturnKind, UserId};

use crate::db::{
    OrderRepository, ProductRepository, RepositoryError, StockAdjustment, WishlistRepository,
};
use crate::models::{NewOrder, Order, OrderWithUser};

/// Days after delivery during which a return or exchange may be requested.
pub const RETURN_WINDOW_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Errors from order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout submitted no line items.
    #[error("no order items")]
    EmptyOrder,

    /// The order does not exist (or is not visible to the caller).
    #[error("order not found")]
    NotFound,

    /// The requested status transition is not allowed from the current state.
    #[error("cannot {action} an order in status {status}")]
    InvalidTransition {
        action: &'static str,
        status: OrderStatus,
    },

    /// Returns are only possible after delivery.
    #[error("order has not been delivered")]
    NotDelivered,

    /// The return window has closed.
    #[error("return window of {RETURN_WINDOW_DAYS} days has expired")]
    WindowExpired,

    /// A return or exchange was already requested for this order.
    #[error("return already requested")]
    AlreadyRequested,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Initial lifecycle status for a new order.
///
/// COD orders go straight to fulfillment; online orders wait for payment
/// verification.
#[must_use]
pub const fn initial_status(method: PaymentMethod) -> OrderStatus {
    match method {
        PaymentMethod::Cod => OrderStatus::Processing,
        PaymentMethod::Razorpay | PaymentMethod::OnlineOriginallyCod => {
            OrderStatus::PaymentPending
        }
    }
}

/// Whole days elapsed since delivery, rounded up.
///
/// Any fraction of a day counts as a full day, so a return attempted
/// 6 days and 1 hour after delivery is on day 7. A `now` before
/// `delivered_at` clamps to zero.
#[must_use]
pub fn days_since_delivery(delivered_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - delivered_at).num_milliseconds().max(0);
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Order lifecycle service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    products: ProductRepository<'a>,
    wishlist: WishlistRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            products: ProductRepository::new(pool),
            wishlist: WishlistRepository::new(pool),
        }
    }

    /// Place an order from checkout input.
    ///
    /// Totals are stored exactly as submitted; they are never recomputed
    /// from the line items. After the order commits, stock is decremented
    /// per line and the ordered products are cleared from the user's
    /// wishlist; failures in either step are logged and do not undo the
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyOrder` if there are no line items.
    pub async fn create_order(
        &self,
        user_id: UserId,
        input: &NewOrder,
    ) -> Result<Order, OrderError> {
        if input.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let status = initial_status(input.payment_method);
        let order = self.orders.create(user_id, input, status).await?;

        for line in &input.items {
            match self
                .products
                .decrement_stock(line.product_id, &line.size, line.quantity)
                .await
            {
                Ok(StockAdjustment::Decremented) => {}
                Ok(outcome) => {
                    warn!(
                        order_id = %order.id,
                        product_id = %line.product_id,
                        size = %line.size,
                        quantity = line.quantity,
                        ?outcome,
                        "stock not decremented for order line"
                    );
                }
                Err(e) => {
                    warn!(
                        order_id = %order.id,
                        product_id = %line.product_id,
                        error = %e,
                        "stock adjustment failed for order line"
                    );
                }
            }
        }

        let ordered: Vec<_> = input.items.iter().map(|line| line.product_id).collect();
        if let Err(e) = self.wishlist.remove_many(user_id, &ordered).await {
            warn!(order_id = %order.id, error = %e, "failed to clear wishlist after order");
        }

        Ok(order)
    }

    /// Get an order, visible only to its owner or an admin.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for both a missing order and one the
    /// caller may not see.
    pub async fn get_order(
        &self,
        order_id: OrderId,
        user_id: UserId,
        is_admin: bool,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !is_admin && order.user_id != user_id {
            return Err(OrderError::NotFound);
        }

        Ok(order)
    }

    /// List the caller's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list_my_orders(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }

    /// List every order with the owning user's name, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list_all_orders(&self) -> Result<Vec<OrderWithUser>, OrderError> {
        Ok(self.orders.list_all().await?)
    }

    /// Mark an order shipped with courier details.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if the order does not exist.
    /// Returns `OrderError::InvalidTransition` unless the order is
    /// `Processing` or `Paid`.
    pub async fn ship(
        &self,
        order_id: OrderId,
        courier: &str,
        tracking_id: &str,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !order.status.can_ship() {
            return Err(OrderError::InvalidTransition {
                action: "ship",
                status: order.status,
            });
        }

        self.orders.mark_shipped(order_id, courier, tracking_id).await?;
        self.orders.get(order_id).await?.ok_or(OrderError::NotFound)
    }

    /// Mark an order delivered at `now`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if the order does not exist.
    /// Returns `OrderError::InvalidTransition` unless the order is `Shipped`.
    pub async fn deliver(&self, order_id: OrderId, now: DateTime<Utc>) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !order.status.can_deliver() {
            return Err(OrderError::InvalidTransition {
                action: "deliver",
                status: order.status,
            });
        }

        self.orders.mark_delivered(order_id, now).await?;
        self.orders.get(order_id).await?.ok_or(OrderError::NotFound)
    }

    /// Request a return or exchange on a delivered order.
    ///
    /// Allowed within [`RETURN_WINDOW_DAYS`] whole days of delivery (any
    /// fraction of a day counts as a full day), once per order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if the order does not exist or
    /// belongs to someone else.
    /// Returns `OrderError::NotDelivered` before delivery.
    /// Returns `OrderError::AlreadyRequested` on a second request.
    /// Returns `OrderError::WindowExpired` after the window closes.
    pub async fn request_return(
        &self,
        order_id: OrderId,
        user_id: UserId,
        kind: ReturnKind,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if order.user_id != user_id {
            return Err(OrderError::NotFound);
        }

        let Some(delivered_at) = order.delivered_at.filter(|_| order.is_delivered) else {
            return Err(OrderError::NotDelivered);
        };

        if order.return_request.is_some() {
            return Err(OrderError::AlreadyRequested);
        }

        if days_since_delivery(delivered_at, now) > RETURN_WINDOW_DAYS {
            return Err(OrderError::WindowExpired);
        }

        self.orders.set_return_request(order_id, kind, reason).await?;
        self.orders.get(order_id).await?.ok_or(OrderError::NotFound)
    }
}
