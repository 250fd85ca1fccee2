//! Integration tests for the product catalog.
//!
//! Run with: cargo test -p vastra-integration-tests -- --ignored

use serde_json::{Value, json};
use vastra_integration_tests::{any_product, base_url, client, register_user};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_list_returns_products_with_variants() {
    let client = client();

    let resp = client
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("product list failed");

    assert_eq!(resp.status(), 200);
    let products: Vec<Value> = resp.json().await.expect("products not JSON");
    assert!(!products.is_empty(), "run `vastra-cli seed` first");

    let product = &products[0];
    assert!(product["sizes"].is_array());
    assert!(product["colors"].is_array());
    assert!(product["images"].is_array());
    assert!(product["price"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_keyword_filter() {
    let client = client();
    let product = any_product(&client).await;
    let name = product["name"].as_str().expect("product name");
    let keyword = &name[..name.len().min(4)];

    let resp = client
        .get(format!("{}/api/products?keyword={keyword}", base_url()))
        .send()
        .await
        .expect("filtered list failed");

    assert_eq!(resp.status(), 200);
    let products: Vec<Value> = resp.json().await.expect("products not JSON");
    assert!(products
        .iter()
        .any(|p| p["name"].as_str() == Some(name)));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_product_is_404() {
    let client = client();

    let resp = client
        .get(format!("{}/api/products/999999", base_url()))
        .send()
        .await
        .expect("detail request failed");

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.expect("error body not JSON");
    assert_eq!(body["message"], json!("Product not found"));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_create_requires_admin() {
    let client = client();
    let user = register_user(&client).await;

    let resp = client
        .post(format!("{}/api/products", base_url()))
        .bearer_auth(&user.token)
        .json(&json!({
            "name": "Rogue Product",
            "price": "10.00",
            "category": "T-Shirts",
        }))
        .send()
        .await
        .expect("create request failed");

    assert_eq!(resp.status(), 403);
}
