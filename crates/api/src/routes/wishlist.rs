//! Wishlist handlers.
//!
//! Every endpoint responds with the caller's full wishlist as product
//! documents, most recently added first, so the client can replace its
//! local copy wholesale.

use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::Deserialize;

use vastra_core::ProductId;

use crate::db::{ProductRepository, WishlistRepository};
use crate::error::Result;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Product, User};
use crate::state::AppState;

/// Wishlist mutation body.
#[derive(Debug, Deserialize)]
pub struct WishlistBody {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
}

/// `GET /api/wishlist`
///
/// Tokenless callers get an empty collection rather than a 401, so the
/// client can render the page before login.
pub async fn list(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let Some(user) = user else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(current_wishlist(&state, &user).await?))
}

/// `POST /api/wishlist/add`
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<WishlistBody>,
) -> Result<Json<Vec<Product>>> {
    WishlistRepository::new(state.pool())
        .add(user.id, body.product_id)
        .await?;
    Ok(Json(current_wishlist(&state, &user).await?))
}

/// `POST /api/wishlist/remove`
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<WishlistBody>,
) -> Result<Json<Vec<Product>>> {
    WishlistRepository::new(state.pool())
        .remove(user.id, body.product_id)
        .await?;
    Ok(Json(current_wishlist(&state, &user).await?))
}

/// Load the caller's wishlist in added order.
async fn current_wishlist(state: &AppState, user: &User) -> Result<Vec<Product>> {
    let ids = WishlistRepository::new(state.pool()).list(user.id).await?;
    let products = ProductRepository::new(state.pool()).get_many(&ids).await?;

    // get_many returns arbitrary order; restore most-recent-first
    let mut by_id: HashMap<ProductId, Product> =
        products.into_iter().map(|p| (p.id, p)).collect();
    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}
