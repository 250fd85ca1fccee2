//! Status enums for orders, payments, and returns.
//!
//! Wire labels match what the storefront client displays ("Payment Pending",
//! "COD", ...), and `Display`/`FromStr` use the same labels so the TEXT
//! columns in Postgres round-trip through the same strings the API serves.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// State machine:
///
/// ```text
/// Payment Pending --(verify_payment)--> Paid
/// Processing --(ship)--> Shipped --(deliver)--> Delivered
/// ```
///
/// Cash-on-delivery orders start at `Processing`; online orders start at
/// `PaymentPending`. There is no transition out of `Delivered`, and no
/// cancellation state exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Online order awaiting payment verification.
    #[serde(rename = "Payment Pending")]
    #[default]
    PaymentPending,
    /// Payment verified; not yet handed to fulfillment.
    Paid,
    /// Being prepared for shipment (initial state for COD).
    Processing,
    /// Handed to the courier; tracking info attached.
    Shipped,
    /// Delivered to the customer.
    Delivered,
}

impl OrderStatus {
    /// Whether a shipping transition (`Processing -> Shipped`) is allowed.
    #[must_use]
    pub const fn can_ship(self) -> bool {
        matches!(self, Self::Processing | Self::Paid)
    }

    /// Whether a delivery transition (`Shipped -> Delivered`) is allowed.
    #[must_use]
    pub const fn can_deliver(self) -> bool {
        matches!(self, Self::Shipped)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PaymentPending => write!(f, "Payment Pending"),
            Self::Paid => write!(f, "Paid"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Payment Pending" => Ok(Self::PaymentPending),
            "Paid" => Ok(Self::Paid),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How the customer chose to pay at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[serde(rename = "COD")]
    Cod,
    /// Online payment through the Razorpay gateway.
    Razorpay,
    /// Originally COD, but the customer paid online before delivery.
    #[serde(rename = "Online (originally COD)")]
    OnlineOriginallyCod,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "COD"),
            Self::Razorpay => write!(f, "Razorpay"),
            Self::OnlineOriginallyCod => write!(f, "Online (originally COD)"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COD" => Ok(Self::Cod),
            "Razorpay" => Ok(Self::Razorpay),
            "Online (originally COD)" => Ok(Self::OnlineOriginallyCod),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Whether a post-delivery request is a return or an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnKind {
    Return,
    Exchange,
}

impl std::fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Return => write!(f, "Return"),
            Self::Exchange => write!(f, "Exchange"),
        }
    }
}

impl std::str::FromStr for ReturnKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Return" => Ok(Self::Return),
            "Exchange" => Ok(Self::Exchange),
            _ => Err(format!("invalid return kind: {s}")),
        }
    }
}

/// Status of a return/exchange request on an order.
///
/// Only one transition exists (`None -> Requested`); there is no
/// approval or rejection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReturnStatus {
    /// No return or exchange has been requested.
    #[default]
    None,
    /// A return or exchange was requested within the window.
    Requested,
}

impl std::fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Requested => write!(f, "Requested"),
        }
    }
}

impl std::str::FromStr for ReturnStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "Requested" => Ok(Self::Requested),
            _ => Err(format!("invalid return status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_labels_roundtrip() {
        for status in [
            OrderStatus::PaymentPending,
            OrderStatus::Paid,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_serde_labels() {
        let json = serde_json::to_string(&OrderStatus::PaymentPending).unwrap();
        assert_eq!(json, "\"Payment Pending\"");
    }

    #[test]
    fn test_payment_method_labels_roundtrip() {
        for method in [
            PaymentMethod::Cod,
            PaymentMethod::Razorpay,
            PaymentMethod::OnlineOriginallyCod,
        ] {
            let parsed: PaymentMethod = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn test_payment_method_serde_cod() {
        let json = serde_json::to_string(&PaymentMethod::Cod).unwrap();
        assert_eq!(json, "\"COD\"");
        let back: PaymentMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PaymentMethod::Cod);
    }

    #[test]
    fn test_shipping_transitions() {
        assert!(OrderStatus::Processing.can_ship());
        assert!(OrderStatus::Paid.can_ship());
        assert!(!OrderStatus::Shipped.can_ship());
        assert!(!OrderStatus::Delivered.can_ship());
        assert!(!OrderStatus::PaymentPending.can_ship());

        assert!(OrderStatus::Shipped.can_deliver());
        assert!(!OrderStatus::Delivered.can_deliver());
        assert!(!OrderStatus::Processing.can_deliver());
    }

    #[test]
    fn test_invalid_labels_rejected() {
        assert!("Cancelled".parse::<OrderStatus>().is_err());
        assert!("PayPal".parse::<PaymentMethod>().is_err());
        assert!("Approved".parse::<ReturnStatus>().is_err());
    }
}
