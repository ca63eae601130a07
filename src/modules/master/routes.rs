use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

/// Company branding is read by the public login page, so the GET stays
/// outside the auth guard.
pub fn company_config_routes() -> Router<Arc<AppState>> {
    Router::new().route("/company-config", get(controller::get_company_config))
}

pub fn master_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/logo",
            post(controller::update_logo).delete(controller::delete_logo),
        )
        .route(
            "/countries",
            get(controller::list_countries).post(controller::create_country),
        )
        .route("/countries/{id}", delete(controller::delete_country))
        .route("/countries/{country_id}/states", get(controller::list_states))
        .route("/states", post(controller::create_state))
        .route("/states/{id}", delete(controller::delete_state))
        .route("/states/{state_id}/cities", get(controller::list_cities))
        .route("/cities", post(controller::create_city))
        .route("/cities/{id}", delete(controller::delete_city))
}
