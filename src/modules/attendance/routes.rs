use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn attendance_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(controller::record).get(controller::list_in_range))
        .route("/bulk", post(controller::bulk_record))
        .route("/employee/{employee_id}", get(controller::list_by_employee))
}
