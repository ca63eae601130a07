pub mod config;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};

use config::DbPool;
use modules::attendance::attendance_routes;
use modules::auth::middleware::require_auth;
use modules::auth::{auth_routes, me_routes};
use modules::documents::document_routes;
use modules::employees::employee_routes;
use modules::master::{company_config_routes, master_routes};
use services::jwt::JwtService;
use services::mailer::Mailer;
use services::security::security_headers;
use services::storage::FileStorage;
use services::templates::TemplateEngine;

pub struct AppState {
    pub db: DbPool,
    pub jwt_service: JwtService,
    pub templates: TemplateEngine,
    pub mailer: Mailer,
    pub storage: FileStorage,
}

pub async fn create_app(
    db: DbPool,
    jwt_service: JwtService,
    templates: TemplateEngine,
    mailer: Mailer,
    storage: FileStorage,
) -> Router {
    let uploads_dir = storage.root().to_path_buf();

    let state = Arc::new(AppState {
        db,
        jwt_service,
        templates,
        mailer,
        storage,
    });

    let auth_guard = middleware::from_fn_with_state(state.clone(), require_auth);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest(
            "/auth",
            auth_routes().merge(me_routes().layer(auth_guard.clone())),
        )
        .nest("/employees", employee_routes().layer(auth_guard.clone()))
        .nest("/documents", document_routes().layer(auth_guard.clone()))
        .nest("/attendance", attendance_routes().layer(auth_guard.clone()))
        .nest(
            "/master",
            company_config_routes().merge(master_routes().layer(auth_guard)),
        )
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 1024 * 10)) // 10MB, base64 document uploads
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "HRM API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
