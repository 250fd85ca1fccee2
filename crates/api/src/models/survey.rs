//! Checkout-abandonment survey types.
//!
//! Fire-and-forget analytics records with no relation to the order
//! lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vastra_core::{SurveyId, UserId};

/// A stored abandonment survey response.
#[derive(Debug, Clone, Serialize)]
pub struct AbandonmentSurvey {
    #[serde(rename = "_id")]
    pub id: SurveyId,
    /// Submitting user, when the caller was authenticated.
    #[serde(rename = "userId")]
    pub user_id: Option<UserId>,
    /// Selected reasons (e.g., "shipping cost", "just browsing").
    pub reasons: Vec<String>,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Device descriptor reported by the client.
    pub device: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Survey submission body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSurvey {
    #[serde(default)]
    pub reasons: Vec<String>,
    pub comment: Option<String>,
    pub device: Option<String>,
}
