//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (pings the database)
//!
//! # Auth
//! POST /api/auth/register           - Create an account
//! POST /api/auth/login              - Login, returns a bearer token
//!
//! # Products
//! GET  /api/products                - Product listing (?keyword= filters)
//! GET  /api/products/{id}           - Product detail
//! POST /api/products                - Create product (admin)
//!
//! # Orders
//! POST /api/orders                  - Place an order
//! GET  /api/orders/myorders         - Caller's order history
//! GET  /api/orders                  - All orders (admin)
//! PUT  /api/orders/{id}/ship        - Mark shipped (admin)
//! PUT  /api/orders/{id}/deliver     - Mark delivered (admin)
//! POST /api/orders/{id}/return      - Request a return or exchange
//! POST /api/orders/abandonment      - Checkout-abandonment survey
//!
//! # Payment
//! POST /api/payment/create          - Create a gateway order
//! POST /api/payment/verify          - Verify a checkout callback
//!
//! # Wishlist
//! GET  /api/wishlist                - Wishlisted products (empty for guests)
//! POST /api/wishlist/add            - Add a product
//! POST /api/wishlist/remove         - Remove a product
//! ```

pub mod auth;
pub mod orders;
pub mod payment;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/{id}", get(products::get_one))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list_all))
        .route("/myorders", get(orders::my_orders))
        .route("/abandonment", post(orders::abandonment))
        .route("/{id}/ship", put(orders::ship))
        .route("/{id}/deliver", put(orders::deliver))
        .route("/{id}/return", post(orders::request_return))
}

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(payment::create))
        .route("/verify", post(payment::verify))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::list))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
}

/// Compose all API routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .nest("/auth", auth_routes())
            .nest("/products", product_routes())
            .nest("/orders", order_routes())
            .nest("/payment", payment_routes())
            .nest("/wishlist", wishlist_routes()),
    )
}
