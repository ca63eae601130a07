use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(controller::register))
        .route("/login", post(controller::login))
        .route("/refresh", post(controller::refresh))
}

/// Routes that require an authenticated caller; the guard layer is applied
/// where these are mounted.
pub fn me_routes() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(controller::me))
}
