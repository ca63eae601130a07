use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn register_creates_user_with_default_role() {
    let ctx = TestContext::new().await;
    let email = test_email();

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({
            "email": &email,
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "EMPLOYEE");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn register_accepts_admin_role() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({
            "email": test_email(),
            "password": test_password(),
            "role": "ADMIN"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["role"], "ADMIN");
}

#[tokio::test]
async fn register_rejects_unknown_role() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({
            "email": test_email(),
            "password": test_password(),
            "role": "SUPERUSER"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/auth/register")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn register_rejects_short_password() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({ "email": test_email(), "password": "short" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({ "email": "not-an-email", "password": test_password() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
