use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

#[tokio::test]
async fn generate_returns_pdf_download() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/documents/generate")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "type": "OFFER_LETTER"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.header("content-type"), "application/pdf");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=OFFER_LETTER.pdf"
    );

    let bytes = response.as_bytes();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn generate_payslip_uses_requested_period() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/documents/generate")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "type": "PAYSLIP",
            "month": "January",
            "year": 2025
        }))
        .await;

    response.assert_status(StatusCode::OK);
    assert!(response.as_bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn generate_unknown_employee_returns_not_found() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    let response = ctx
        .server
        .post("/documents/generate")
        .authorization_bearer(&token)
        .json(&json!({ "employeeId": "ghost", "type": "OFFER_LETTER" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generate_unknown_template_returns_not_found() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/documents/generate")
        .authorization_bearer(&token)
        .json(&json!({ "employeeId": employee["id"], "type": "NO_SUCH_LETTER" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_generate_persists_a_record_per_type() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;
    let id = employee["id"].as_str().unwrap();

    let response = ctx
        .server
        .post("/documents/bulk-generate")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "types": ["APPOINTMENT_LETTER", "EXPERIENCE_LETTER"]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let created = created.as_array().unwrap();

    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|d| d["status"] == "Generated"));
    assert!(created
        .iter()
        .all(|d| d["filePath"].as_str().is_some_and(|p| p.ends_with(".pdf"))));

    // Records show up in the employee's document list alongside the
    // onboarding offer letter.
    let listed: serde_json::Value = ctx
        .server
        .get(&format!("/documents/employee/{id}"))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(listed.as_array().map(Vec::len), Some(3));
}
