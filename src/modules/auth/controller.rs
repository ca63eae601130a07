use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;
use validator::Validate;

use crate::modules::auth::crud::{AuthCrud, AuthError};
use crate::modules::auth::schema::{
    LoginRequest, MeResponse, RefreshRequest, RegisterRequest, RegisterResponse,
    TokenPairResponse,
};
use crate::modules::ErrorResponse;
use crate::services::jwt::AccessClaims;
use crate::AppState;

const ROLES: &[&str] = &["ADMIN", "EMPLOYEE"];

fn reply_err(e: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err(bad_request(e.to_string()));
    }

    let role = req.role.as_deref().unwrap_or("EMPLOYEE");
    if !ROLES.contains(&role) {
        return Err(bad_request("Role must be ADMIN or EMPLOYEE"));
    }

    let crud = AuthCrud::new(state.db.clone(), &state.jwt_service);
    let user = crud
        .register(&req.email, &req.password, role)
        .await
        .map_err(reply_err)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user: user.into() }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err(bad_request(e.to_string()));
    }

    let crud = AuthCrud::new(state.db.clone(), &state.jwt_service);
    let tokens = crud.login(&req.email, &req.password).await.map_err(reply_err)?;

    Ok(Json(TokenPairResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: tokens.user.into(),
    }))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err(bad_request(e.to_string()));
    }

    let crud = AuthCrud::new(state.db.clone(), &state.jwt_service);
    let tokens = crud.refresh(&req.refresh_token).await.map_err(reply_err)?;

    Ok(Json(TokenPairResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: tokens.user.into(),
    }))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<MeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = AuthCrud::new(state.db.clone(), &state.jwt_service);
    let user = crud
        .find_by_id(&claims.sub)
        .await
        .map_err(reply_err)?
        .ok_or_else(|| reply_err(AuthError::UserNotFound))?;

    Ok(Json(MeResponse { user: user.into() }))
}
