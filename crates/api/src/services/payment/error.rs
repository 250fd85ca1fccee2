//! Payment error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during payment operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request to the gateway failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned an error response.
    #[error("gateway error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The order amount does not convert to integer minor units.
    #[error("amount cannot be expressed in paise")]
    AmountOverflow,

    /// The client-supplied signature does not match the expected HMAC.
    #[error("payment signature verification failed")]
    SignatureMismatch,

    /// The order being paid does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
