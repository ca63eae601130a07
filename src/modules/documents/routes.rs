use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn document_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(controller::generate))
        .route("/bulk-generate", post(controller::bulk_generate))
        .route("/send-email", post(controller::send_email))
        .route("/employee/{employee_id}", get(controller::list_by_employee))
        .route("/monthly-status", get(controller::monthly_status))
        .route("/{id}/status", put(controller::update_status))
}
