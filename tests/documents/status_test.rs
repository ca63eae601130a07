use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

async fn uploaded_document_id(ctx: &TestContext, token: &str) -> (String, String) {
    let employee: serde_json::Value = ctx
        .server
        .post("/employees")
        .authorization_bearer(token)
        .json(&json!({
            "firstName": "Neha",
            "lastName": "Verma",
            "email": crate::common::test_email(),
            "department": "Design",
            "jobTitle": "Designer",
            "idProof": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg=="
        }))
        .await
        .json();

    let employee_id = employee["id"].as_str().unwrap().to_string();
    let documents: serde_json::Value = ctx
        .server
        .get(&format!("/documents/employee/{employee_id}"))
        .authorization_bearer(token)
        .await
        .json();

    let doc_id = documents
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["type"] == "ID_PROOF")
        .and_then(|d| d["id"].as_str())
        .unwrap()
        .to_string();

    (employee_id, doc_id)
}

#[tokio::test]
async fn approve_clears_rejection_reason() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let (_, doc_id) = uploaded_document_id(&ctx, &token).await;

    let rejected: serde_json::Value = ctx
        .server
        .put(&format!("/documents/{doc_id}/status"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "Rejected", "rejectionReason": "blurry scan" }))
        .await
        .json();
    assert_eq!(rejected["status"], "Rejected");
    assert_eq!(rejected["rejectionReason"], "blurry scan");

    let approved: serde_json::Value = ctx
        .server
        .put(&format!("/documents/{doc_id}/status"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "Approved" }))
        .await
        .json();
    assert_eq!(approved["status"], "Approved");
    assert!(approved["rejectionReason"].is_null());
}

#[tokio::test]
async fn rejection_reason_is_ignored_outside_rejected() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let (_, doc_id) = uploaded_document_id(&ctx, &token).await;

    let body: serde_json::Value = ctx
        .server
        .put(&format!("/documents/{doc_id}/status"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "Approved", "rejectionReason": "should be dropped" }))
        .await
        .json();

    assert_eq!(body["status"], "Approved");
    assert!(body["rejectionReason"].is_null());
}

#[tokio::test]
async fn update_status_unknown_document_returns_not_found() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    ctx.server
        .put("/documents/ghost/status")
        .authorization_bearer(&token)
        .json(&json!({ "status": "Approved" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_employee_cascades_to_documents() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let (employee_id, _) = uploaded_document_id(&ctx, &token).await;

    ctx.server
        .delete(&format!("/employees/{employee_id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let documents: serde_json::Value = ctx
        .server
        .get(&format!("/documents/employee/{employee_id}"))
        .authorization_bearer(&token)
        .await
        .json();

    assert_eq!(documents.as_array().map(Vec::len), Some(0));
}
