use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, TestContext};

// 1x1 transparent PNG
const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

#[tokio::test]
async fn create_with_password_provisions_portal_login() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let email = test_email();

    let response = ctx
        .server
        .post("/employees")
        .authorization_bearer(&token)
        .json(&json!({
            "firstName": "Priya",
            "lastName": "Shah",
            "email": &email,
            "department": "HR",
            "jobTitle": "HR Executive",
            "password": "portal-pass-1"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let employee: serde_json::Value = response.json();
    assert!(employee["userId"].as_str().is_some());

    // The provisioned account can sign in with the employee's email.
    let login = ctx
        .server
        .post("/auth/login")
        .json(&json!({ "email": &email, "password": "portal-pass-1" }))
        .await;

    login.assert_status(StatusCode::OK);
    let body: serde_json::Value = login.json();
    assert_eq!(body["user"]["role"], "EMPLOYEE");
}

#[tokio::test]
async fn create_without_password_has_no_portal_login() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    let employee = ctx.create_employee(&token).await;
    assert!(employee["userId"].is_null());
}

#[tokio::test]
async fn create_generates_offer_letter_record() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;
    let id = employee["id"].as_str().unwrap();

    let response = ctx
        .server
        .get(&format!("/documents/employee/{id}"))
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::OK);
    let documents: serde_json::Value = response.json();
    let documents = documents.as_array().unwrap();

    assert!(documents
        .iter()
        .any(|d| d["type"] == "OFFER_LETTER" && d["status"] == "Generated"));
}

#[tokio::test]
async fn create_records_uploaded_credentials_as_documents() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    let response = ctx
        .server
        .post("/employees")
        .authorization_bearer(&token)
        .json(&json!({
            "firstName": "Dev",
            "lastName": "Patel",
            "email": test_email(),
            "department": "Engineering",
            "jobTitle": "Developer",
            "idProof": PNG_DATA_URL
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let employee: serde_json::Value = response.json();
    let id = employee["id"].as_str().unwrap();

    assert!(employee["idProof"]
        .as_str()
        .is_some_and(|p| p.starts_with("/uploads/")));

    let documents: serde_json::Value = ctx
        .server
        .get(&format!("/documents/employee/{id}"))
        .authorization_bearer(&token)
        .await
        .json();

    assert!(documents
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d["type"] == "ID_PROOF" && d["category"] == "UPLOADED"));
}
