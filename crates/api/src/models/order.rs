//! Order domain types.
//!
//! Order items are immutable snapshots of the purchased line (name, price,
//! image, size, color, quantity) captured at order-creation time, never
//! re-joined to the live product. Totals are computed once at checkout and
//! stored as authoritative history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vastra_core::{Money, OrderId, OrderItemId, OrderStatus, PaymentMethod, ProductId, ReturnKind, ReturnStatus, UserId};

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// How the customer chose to pay.
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    /// Snapshot line items.
    pub items: Vec<OrderItem>,
    /// Free-text shipping address.
    #[serde(rename = "shippingAddress")]
    pub shipping_address: ShippingAddress,
    /// Caller-computed totals, stored verbatim at creation.
    #[serde(flatten)]
    pub totals: OrderTotals,
    /// Whether payment has been verified (or collected, for COD).
    #[serde(rename = "isPaid")]
    pub is_paid: bool,
    /// When payment was verified.
    #[serde(rename = "paidAt")]
    pub paid_at: Option<DateTime<Utc>>,
    /// Whether the order has been delivered.
    #[serde(rename = "isDelivered")]
    pub is_delivered: bool,
    /// When the order was delivered.
    #[serde(rename = "deliveredAt")]
    pub delivered_at: Option<DateTime<Utc>>,
    /// Courier name, set when shipped.
    pub courier: Option<String>,
    /// Courier tracking ID, set when shipped.
    #[serde(rename = "trackingId")]
    pub tracking_id: Option<String>,
    /// Return/exchange request, if any.
    #[serde(rename = "returnRequest")]
    pub return_request: Option<ReturnRequest>,
    /// Gateway payment snapshot, set on successful verification.
    #[serde(rename = "paymentResult")]
    pub payment_result: Option<PaymentSnapshot>,
    /// When the order was placed.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// An immutable snapshot of a purchased product line.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    /// Database ID of this line.
    #[serde(rename = "_id")]
    pub id: OrderItemId,
    /// The product this line referenced at purchase time.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Product name at purchase time.
    pub name: String,
    /// Product image at purchase time.
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    /// Chosen size.
    pub size: String,
    /// Chosen color.
    pub color: Option<String>,
    /// Units ordered.
    pub quantity: i32,
    /// Unit price at purchase time.
    #[serde(rename = "unitPrice")]
    pub unit_price: Money,
}

/// Free-text shipping address captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub country: String,
}

/// Totals computed by the checkout client and stored verbatim.
///
/// Never recomputed from items afterward; they are history, not a view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderTotals {
    #[serde(rename = "itemsPrice")]
    pub items_price: Money,
    #[serde(rename = "taxPrice")]
    pub tax_price: Money,
    #[serde(rename = "shippingPrice")]
    pub shipping_price: Money,
    #[serde(rename = "totalPrice")]
    pub total_price: Money,
}

/// A return or exchange request on a delivered order.
#[derive(Debug, Clone, Serialize)]
pub struct ReturnRequest {
    pub kind: ReturnKind,
    pub status: ReturnStatus,
    pub reason: String,
}

/// Gateway payment snapshot stored on successful verification.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSnapshot {
    /// Gateway payment ID.
    pub payment_id: String,
    /// Gateway-reported status.
    pub status: String,
    /// When the verification happened.
    pub update_time: DateTime<Utc>,
    /// Payer email, when the gateway reports one.
    pub payer_email: Option<String>,
}

/// An order as the admin list sees it, with the owning user's name.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithUser {
    #[serde(flatten)]
    pub order: Order,
    /// Owning user's display name.
    #[serde(rename = "userName")]
    pub user_name: String,
}

/// Checkout input for order creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    #[serde(rename = "shippingAddress")]
    pub shipping_address: ShippingAddress,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    #[serde(flatten)]
    pub totals: OrderTotals,
}

/// A cart line as submitted at checkout.
///
/// Name, image, and price come from the client cart and are stored as the
/// snapshot; the server only resolves the product for stock adjustment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub size: String,
    pub color: Option<String>,
    pub quantity: i32,
    #[serde(rename = "unitPrice")]
    pub unit_price: Money,
}
