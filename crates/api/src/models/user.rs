//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vastra_core::{Email, UserId};

/// A storefront account.
///
/// The password hash never leaves the db layer; this type is safe to
/// serialize into API responses.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique at the store level).
    pub email: Email,
    /// Whether this account can use admin endpoints.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// When the account was created.
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}
