use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

// 1x1 transparent PNG
const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

#[tokio::test]
async fn company_config_is_publicly_readable() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/master/company-config").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["id"].as_str().is_some());
    assert!(body["logoPath"].is_null());
}

#[tokio::test]
async fn update_logo_stores_file_and_path() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    let response = ctx
        .server
        .post("/master/logo")
        .authorization_bearer(&token)
        .json(&json!({ "logo": PNG_DATA_URL }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["logoPath"]
        .as_str()
        .is_some_and(|p| p.starts_with("/uploads/company/")));

    // Visible through the public read.
    let public: serde_json::Value = ctx.server.get("/master/company-config").await.json();
    assert_eq!(public["logoPath"], body["logoPath"]);
}

#[tokio::test]
async fn update_logo_rejects_unsupported_type() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    let response = ctx
        .server
        .post("/master/logo")
        .authorization_bearer(&token)
        .json(&json!({ "logo": "data:application/pdf;base64,JVBERi0=" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_logo_clears_path() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    ctx.server
        .post("/master/logo")
        .authorization_bearer(&token)
        .json(&json!({ "logo": PNG_DATA_URL }))
        .await
        .assert_status(StatusCode::OK);

    let response = ctx
        .server
        .delete("/master/logo")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["logoPath"].is_null());
}

#[tokio::test]
async fn logo_mutations_require_authentication() {
    let ctx = TestContext::new().await;

    ctx.server
        .post("/master/logo")
        .json(&json!({ "logo": PNG_DATA_URL }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.server
        .delete("/master/logo")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
