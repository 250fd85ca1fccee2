//! Integration tests for registration and login.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p vastra-api)
//!
//! Run with: cargo test -p vastra-integration-tests -- --ignored

use serde_json::{Value, json};
use vastra_integration_tests::{base_url, client, register_user};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_then_login() {
    let client = client();
    let user = register_user(&client).await;

    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "email": user.email, "password": user.password }))
        .send()
        .await
        .expect("login request failed");

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("login response not JSON");
    assert_eq!(body["_id"].as_i64(), Some(user.id));
    assert_eq!(body["isAdmin"], json!(false));
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_email_conflicts() {
    let client = client();
    let user = register_user(&client).await;

    // Same email, different case: normalization makes it a duplicate
    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({
            "name": "Copycat",
            "email": user.email.to_uppercase(),
            "password": "another-password",
        }))
        .send()
        .await
        .expect("register request failed");

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.expect("error body not JSON");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_wrong_password_unauthorized() {
    let client = client();
    let user = register_user(&client).await;

    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "email": user.email, "password": "wrong-password" }))
        .send()
        .await
        .expect("login request failed");

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_short_password_rejected() {
    let client = client();

    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({
            "name": "Shorty",
            "email": "shorty@vastra.test",
            "password": "short",
        }))
        .send()
        .await
        .expect("register request failed");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_protected_route_requires_token() {
    let client = client();

    let resp = client
        .get(format!("{}/api/orders/myorders", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 401);
}
