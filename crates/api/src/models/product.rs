//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vastra_core::{Money, ProductId};

/// A catalog product with its size variants, colors, and images.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Unit price in rupees.
    pub price: Money,
    /// Category label (e.g., "Shirts", "Dresses").
    pub category: String,
    /// Aggregate rating (0-5).
    pub rating: Decimal,
    /// Number of reviews behind the rating.
    #[serde(rename = "numReviews")]
    pub review_count: i32,
    /// Featured on the best-sellers rail.
    #[serde(rename = "bestSeller")]
    pub best_seller: bool,
    /// Per-size stock counts.
    pub sizes: Vec<SizeVariant>,
    /// Available colors.
    pub colors: Vec<ColorOption>,
    /// Hosted image URLs, in display order.
    pub images: Vec<String>,
    /// When the product was created.
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// A (size, stock-count) pair within a product's inventory.
///
/// Stock is non-negative; the decrement query enforces this with a
/// `stock >= qty` guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVariant {
    /// Size label (e.g., "S", "M", "XL").
    pub size: String,
    /// Units in stock for this size.
    pub stock: i32,
}

/// A named color with its display hex code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    /// Color name (e.g., "Indigo").
    pub name: String,
    /// Hex code (e.g., "#3F51B5").
    pub hex: String,
}

/// Input for admin product creation.
///
/// Images are already-hosted URLs; the API does not handle uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<SizeVariant>,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "bestSeller", default)]
    pub best_seller: bool,
}
