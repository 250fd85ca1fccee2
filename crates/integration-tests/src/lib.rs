//! Integration tests for Vastra.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p vastra-cli -- migrate
//!
//! # Start the API server
//! cargo run -p vastra-api
//!
//! # Run the ignored integration tests
//! cargo test -p vastra-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they need a live server
//! at `API_BASE_URL` (default `http://localhost:8000`) with a migrated
//! database behind it. Each test registers its own throwaway account, so
//! tests are independent and repeatable against the same database.
//!
//! Tests that create products need an admin account: create one with
//! `vastra-cli admin create` and point `ADMIN_EMAIL` / `ADMIN_PASSWORD`
//! at it.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Plain HTTP client.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// A registered account and its bearer token.
pub struct TestUser {
    pub email: String,
    pub password: String,
    pub token: String,
    pub id: i64,
}

/// Register a fresh account with a unique email and return its token.
///
/// # Panics
///
/// Panics if the server rejects the registration; the suite cannot
/// proceed without an account.
pub async fn register_user(client: &Client) -> TestUser {
    let email = format!("it-{}@vastra.test", Uuid::new_v4());
    let password = "integration-test-pw".to_string();

    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({
            "name": "Integration Test",
            "email": email,
            "password": password,
        }))
        .send()
        .await
        .expect("register request failed");

    assert_eq!(resp.status(), 201, "registration should succeed");
    let body: Value = resp.json().await.expect("register response not JSON");

    TestUser {
        email,
        password,
        token: body["token"].as_str().expect("token missing").to_string(),
        id: body["_id"].as_i64().expect("_id missing"),
    }
}

/// Log in as the admin account named by `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
///
/// # Panics
///
/// Panics if the variables are unset, the login fails, or the account is
/// not an admin. Create one with `vastra-cli admin create` first.
pub async fn admin_user(client: &Client) -> TestUser {
    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@vastra.test".to_string());
    let password = std::env::var("ADMIN_PASSWORD")
        .expect("set ADMIN_PASSWORD for an account created with `vastra-cli admin create`");

    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("admin login request failed");

    assert_eq!(resp.status(), 200, "admin login should succeed");
    let body: Value = resp.json().await.expect("login response not JSON");
    assert_eq!(body["isAdmin"], json!(true), "account is not an admin");

    TestUser {
        email,
        password,
        token: body["token"].as_str().expect("token missing").to_string(),
        id: body["_id"].as_i64().expect("_id missing"),
    }
}

/// Create a product with the given per-size stock, returning its JSON.
///
/// # Panics
///
/// Panics if the server rejects the creation.
pub async fn create_product(client: &Client, admin: &TestUser, sizes: &[(&str, i64)]) -> Value {
    let sizes: Vec<Value> = sizes
        .iter()
        .map(|(size, stock)| json!({ "size": size, "stock": stock }))
        .collect();

    let resp = client
        .post(format!("{}/api/products", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({
            "name": format!("Test Tee {}", Uuid::new_v4()),
            "description": "Throwaway product",
            "price": "799.00",
            "category": "T-Shirts",
            "sizes": sizes,
        }))
        .send()
        .await
        .expect("product create request failed");

    assert_eq!(resp.status(), 201, "product creation should succeed");
    resp.json().await.expect("product not JSON")
}

/// A checkout body with one line for the given product/size.
#[must_use]
pub fn order_body(product_id: i64, size: &str, payment_method: &str) -> Value {
    order_body_with_qty(product_id, size, 1, payment_method)
}

/// A checkout body with one line of the given quantity.
#[must_use]
pub fn order_body_with_qty(
    product_id: i64,
    size: &str,
    quantity: i64,
    payment_method: &str,
) -> Value {
    json!({
        "items": [{
            "productId": product_id,
            "name": "Test Product",
            "imageUrl": null,
            "size": size,
            "color": null,
            "quantity": quantity,
            "unitPrice": "799.00",
        }],
        "shippingAddress": {
            "street": "1 Test Lane",
            "city": "Mumbai",
            "postalCode": "400001",
            "country": "India",
        },
        "paymentMethod": payment_method,
        "itemsPrice": "799.00",
        "taxPrice": "0.00",
        "shippingPrice": "0.00",
        "totalPrice": "799.00",
    })
}

/// Fetch the first product in the catalog; tests need seeded data.
///
/// # Panics
///
/// Panics if the catalog is empty. Run `vastra-cli seed` first.
pub async fn any_product(client: &Client) -> Value {
    let resp = client
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("product list request failed");
    assert_eq!(resp.status(), 200);

    let products: Vec<Value> = resp.json().await.expect("product list not JSON");
    products
        .into_iter()
        .next()
        .expect("catalog is empty; run `vastra-cli seed`")
}
