use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

#[tokio::test]
async fn record_creates_attendance_row() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "date": "2025-06-02",
            "status": "Present",
            "checkIn": "2025-06-02T09:00:00Z",
            "checkOut": "2025-06-02T17:30:00Z"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "Present");
    assert_eq!(body["date"], "2025-06-02");
}

#[tokio::test]
async fn second_submission_for_same_day_overwrites() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let first: serde_json::Value = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "date": "2025-06-02",
            "status": "Present"
        }))
        .await
        .json();

    let second: serde_json::Value = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "date": "2025-06-02",
            "status": "Half Day",
            "note": "left early"
        }))
        .await
        .json();

    // Same row, updated in place.
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["status"], "Half Day");
    assert_eq!(second["note"], "left early");
}

#[tokio::test]
async fn record_rejects_check_out_before_check_in() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "date": "2025-06-02",
            "status": "Present",
            "checkIn": "2025-06-02T17:00:00Z",
            "checkOut": "2025-06-02T09:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Check-out time must be after check-in time");
}

#[tokio::test]
async fn record_rejects_unknown_employee() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;

    let response = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": "no-such-employee",
            "date": "2025-06-02",
            "status": "Present"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn record_accepts_timestamp_date_and_truncates_to_day() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "date": "2025-03-10T09:30:00.000Z",
            "status": "Present"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["date"], "2025-03-10");

    // A date-only resubmission for the same day hits the same row.
    let second: serde_json::Value = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "date": "2025-03-10",
            "status": "Late"
        }))
        .await
        .json();
    assert_eq!(second["id"], body["id"]);
    assert_eq!(second["status"], "Late");
}

#[tokio::test]
async fn record_rejects_malformed_date() {
    let ctx = TestContext::new().await;
    let token = ctx.login_admin().await;
    let employee = ctx.create_employee(&token).await;

    let response = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&token)
        .json(&json!({
            "employeeId": employee["id"],
            "date": "02/06/2025",
            "status": "Present"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
