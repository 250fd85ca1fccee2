//! Razorpay payment bridge.
//!
//! Two halves: [`RazorpayClient`] creates gateway orders over HTTPS, and
//! [`PaymentService`] verifies the checkout callback signature and records
//! the payment on the order. Verification is pure HMAC math; the gateway
//! is never called during verification.

mod error;

pub use error::PaymentError;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sqlx::PgPool;
use uuid::Uuid;

use vastra_core::{Money, OrderId, OrderStatus, PaymentMethod};

use crate::config::RazorpayConfig;
use crate::db::OrderRepository;
use crate::models::{Order, PaymentSnapshot};

type HmacSha256 = Hmac<Sha256>;

/// A gateway order as returned by order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway order ID ("order_...").
    pub id: String,
    /// Amount in minor units (paise).
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: String,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    description: String,
}

/// Razorpay Orders API client.
#[derive(Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    key_id: String,
    key_secret: SecretString,
    base_url: String,
}

impl RazorpayClient {
    /// Create a new gateway client.
    #[must_use]
    pub fn new(config: &RazorpayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            base_url: config.api_base.clone(),
        }
    }

    /// The public key ID the checkout client embeds in its widget.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create a gateway order for the given amount.
    ///
    /// The amount is converted to integer paise; the receipt is a fresh
    /// UUID since the storefront order may not exist yet at this point.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::AmountOverflow` if the amount does not fit
    /// in paise, `PaymentError::Api` on a gateway error response, and
    /// `PaymentError::Http` on transport failures.
    pub async fn create_order(&self, amount: Money) -> Result<GatewayOrder, PaymentError> {
        let paise = amount.to_minor_units().ok_or(PaymentError::AmountOverflow)?;

        let body = CreateOrderBody {
            amount: paise,
            currency: "INR",
            receipt: Uuid::new_v4().to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GatewayErrorBody>()
                .await
                .map_or_else(|_| "unknown gateway error".to_owned(), |b| b.error.description);
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Check a checkout callback signature against this client's secret.
    #[must_use]
    pub fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> bool {
        signature_matches(
            self.key_secret.expose_secret(),
            gateway_order_id,
            gateway_payment_id,
            signature,
        )
    }
}

/// Compute the expected callback signature for an (order, payment) pair.
///
/// Lowercase hex of HMAC-SHA256 over `"{order_id}|{payment_id}"`, keyed
/// with the gateway secret. This is the exact string Razorpay sends back
/// to the checkout client.
fn expected_signature(secret: &str, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(gateway_payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Whether a client-supplied signature matches the expected HMAC exactly.
///
/// Exact string equality: an uppercase-hex rendition of the right digest
/// still fails.
#[must_use]
fn signature_matches(
    secret: &str,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature: &str,
) -> bool {
    expected_signature(secret, gateway_order_id, gateway_payment_id) == signature
}

/// Records verified payments on orders.
pub struct PaymentService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> PaymentService<'a> {
    /// Create a new payment service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Verify a checkout callback and mark the order paid.
    ///
    /// On a signature mismatch nothing is written; the order stays exactly
    /// as it was. On a match the order becomes `Paid` with a payment
    /// snapshot, and a COD order paid before delivery is relabeled
    /// "Online (originally COD)".
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::SignatureMismatch` if the HMAC check fails.
    /// Returns `PaymentError::OrderNotFound` if the order does not exist.
    pub async fn verify_and_record(
        &self,
        gateway: &RazorpayClient,
        order_id: OrderId,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
        payer_email: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Order, PaymentError> {
        if !gateway.verify_signature(gateway_order_id, gateway_payment_id, signature) {
            return Err(PaymentError::SignatureMismatch);
        }

        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(PaymentError::OrderNotFound)?;

        let snapshot = PaymentSnapshot {
            payment_id: gateway_payment_id.to_owned(),
            status: "captured".to_owned(),
            update_time: now,
            payer_email,
        };

        let relabel = match order.payment_method {
            PaymentMethod::Cod => Some(PaymentMethod::OnlineOriginallyCod),
            PaymentMethod::Razorpay | PaymentMethod::OnlineOriginallyCod => None,
        };

        self.orders
            .mark_paid(order_id, &snapshot, OrderStatus::Paid, relabel)
            .await?;

        self.orders
            .get(order_id)
            .await?
            .ok_or(PaymentError::OrderNotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &str = "gw-secret-for-tests";

    #[test]
    fn test_signature_roundtrip() {
        let sig = expected_signature(SECRET, "order_ABC123", "pay_XYZ789");
        assert!(signature_matches(SECRET, "order_ABC123", "pay_XYZ789", &sig));
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let sig = expected_signature(SECRET, "order_ABC123", "pay_XYZ789");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_wrong_payment_id_fails() {
        let sig = expected_signature(SECRET, "order_ABC123", "pay_XYZ789");
        assert!(!signature_matches(SECRET, "order_ABC123", "pay_OTHER", &sig));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let sig = expected_signature(SECRET, "order_ABC123", "pay_XYZ789");
        assert!(!signature_matches("other-secret", "order_ABC123", "pay_XYZ789", &sig));
    }

    #[test]
    fn test_uppercase_hex_fails_exact_comparison() {
        let sig = expected_signature(SECRET, "order_ABC123", "pay_XYZ789").to_uppercase();
        assert!(!signature_matches(SECRET, "order_ABC123", "pay_XYZ789", &sig));
    }

    #[test]
    fn test_separator_not_ambiguous() {
        // "a|bc" vs "ab|c" must not collide
        let one = expected_signature(SECRET, "a", "bc");
        let two = expected_signature(SECRET, "ab", "c");
        assert_ne!(one, two);
    }
}
