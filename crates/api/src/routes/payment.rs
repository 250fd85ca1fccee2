//! Payment gateway handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use vastra_core::{Money, OrderId};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::PaymentService;
use crate::state::AppState;

/// Gateway order creation body.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    /// Amount in rupees; converted to paise for the gateway.
    pub amount: Money,
}

/// Gateway order details the checkout widget needs.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    /// Gateway order ID to pass to the widget.
    pub id: String,
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
    /// Public key ID for the widget.
    #[serde(rename = "keyId")]
    pub key_id: String,
}

/// Verification outcome the checkout client switches on.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    /// The order's status after verification.
    pub status: vastra_core::OrderStatus,
}

/// Checkout callback verification body.
#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    /// The storefront order being paid.
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    #[serde(rename = "razorpayOrderId")]
    pub razorpay_order_id: String,
    #[serde(rename = "razorpayPaymentId")]
    pub razorpay_payment_id: String,
    #[serde(rename = "razorpaySignature")]
    pub razorpay_signature: String,
    #[serde(rename = "payerEmail")]
    pub payer_email: Option<String>,
}

/// `POST /api/payment/create`
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> Result<Json<CreateResponse>> {
    let gateway_order = state.gateway().create_order(body.amount).await?;

    Ok(Json(CreateResponse {
        id: gateway_order.id,
        amount: gateway_order.amount,
        currency: gateway_order.currency,
        key_id: state.gateway().key_id().to_string(),
    }))
}

/// `POST /api/payment/verify`
///
/// Verifies the checkout callback HMAC and records the payment. A
/// mismatched signature leaves the order untouched.
pub async fn verify(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<VerifyResponse>> {
    let service = PaymentService::new(state.pool());
    let order = service
        .verify_and_record(
            state.gateway(),
            body.order_id,
            &body.razorpay_order_id,
            &body.razorpay_payment_id,
            &body.razorpay_signature,
            body.payer_email,
            Utc::now(),
        )
        .await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.id,
        "payment verified"
    );

    Ok(Json(VerifyResponse {
        success: true,
        message: "Payment verified successfully".to_string(),
        status: order.status,
    }))
}
