//! Integration tests for the wishlist.
//!
//! Run with: cargo test -p vastra-integration-tests -- --ignored

use serde_json::Value;
use serde_json::json;
use vastra_integration_tests::{any_product, base_url, client, order_body, register_user};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_is_idempotent() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await;
    let product_id = product["_id"].as_i64().expect("product id");

    for _ in 0..2 {
        let resp = client
            .post(format!("{}/api/wishlist/add", base_url()))
            .bearer_auth(&user.token)
            .json(&json!({ "productId": product_id }))
            .send()
            .await
            .expect("wishlist add failed");
        assert_eq!(resp.status(), 200);
    }

    let resp = client
        .get(format!("{}/api/wishlist", base_url()))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("wishlist get failed");
    let wishlist: Vec<Value> = resp.json().await.expect("wishlist not JSON");
    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist[0]["_id"].as_i64(), Some(product_id));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_remove_absent_is_noop() {
    let client = client();
    let user = register_user(&client).await;

    let resp = client
        .post(format!("{}/api/wishlist/remove", base_url()))
        .bearer_auth(&user.token)
        .json(&json!({ "productId": 999_999 }))
        .send()
        .await
        .expect("wishlist remove failed");

    assert_eq!(resp.status(), 200);
    let wishlist: Vec<Value> = resp.json().await.expect("wishlist not JSON");
    assert!(wishlist.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_ordering_clears_wishlisted_product() {
    let client = client();
    let user = register_user(&client).await;
    let product = any_product(&client).await;
    let product_id = product["_id"].as_i64().expect("product id");
    let size = product["sizes"][0]["size"].as_str().expect("product size");

    let resp = client
        .post(format!("{}/api/wishlist/add", base_url()))
        .bearer_auth(&user.token)
        .json(&json!({ "productId": product_id }))
        .send()
        .await
        .expect("wishlist add failed");
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&user.token)
        .json(&order_body(product_id, size, "COD"))
        .send()
        .await
        .expect("order request failed");
    assert_eq!(resp.status(), 201);

    let resp = client
        .get(format!("{}/api/wishlist", base_url()))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("wishlist get failed");
    let wishlist: Vec<Value> = resp.json().await.expect("wishlist not JSON");
    assert!(
        wishlist.iter().all(|p| p["_id"].as_i64() != Some(product_id)),
        "ordered product should leave the wishlist"
    );
}
