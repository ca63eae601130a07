use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

#[tokio::test]
async fn bulk_records_every_valid_entry() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let alice = ctx.create_employee(&token).await;
    let bob = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/attendance/bulk")
        .authorization_bearer(&token)
        .json(&json!({
            "records": [
                { "employeeId": alice["id"], "date": "2025-06-02", "status": "Present" },
                { "employeeId": bob["id"], "date": "2025-06-02", "status": "Absent" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let results: serde_json::Value = response.json();
    let results = results.as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["success"] == true));
    assert!(results.iter().all(|r| r["id"].as_str().is_some()));
}

#[tokio::test]
async fn bulk_reports_failures_without_aborting_the_batch() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/attendance/bulk")
        .authorization_bearer(&token)
        .json(&json!({
            "records": [
                { "employeeId": "ghost", "date": "2025-06-02", "status": "Present" },
                { "employeeId": employee["id"], "date": "2025-06-02", "status": "Present" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let results: serde_json::Value = response.json();
    let results = results.as_array().unwrap();

    assert_eq!(results[0]["success"], false);
    assert_eq!(results[0]["error"], "Employee not found");
    assert_eq!(results[1]["success"], true);
}

#[tokio::test]
async fn bulk_validates_each_record_like_the_single_endpoint() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/attendance/bulk")
        .authorization_bearer(&token)
        .json(&json!({
            "records": [
                { "employeeId": employee["id"], "date": "2025-06-02", "status": "" },
                { "employeeId": employee["id"], "date": "2025-06-03", "status": "Present" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let results: serde_json::Value = response.json();
    let results = results.as_array().unwrap();

    assert_eq!(results[0]["success"], false);
    assert!(results[0]["error"].as_str().is_some());
    assert_eq!(results[1]["success"], true);

    // The invalid entry was never stored.
    let rows: serde_json::Value = ctx
        .server
        .get(&format!(
            "/attendance/employee/{}?month=6&year=2025",
            employee["id"].as_str().unwrap()
        ))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn bulk_rejects_empty_batch() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    let response = ctx
        .server
        .post("/attendance/bulk")
        .authorization_bearer(&token)
        .json(&json!({ "records": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
