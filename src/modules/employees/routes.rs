use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn employee_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(controller::list).post(controller::create))
        .route(
            "/{id}",
            get(controller::get_by_id)
                .put(controller::update)
                .delete(controller::remove),
        )
}
