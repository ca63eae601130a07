use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::modules::ErrorResponse;
use crate::AppState;

fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new("Unauthorized")))
}

/// Bearer-token guard. Verified claims are stashed in request extensions for
/// handlers that need the caller's identity.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(unauthorized());
    };

    let claims = state
        .jwt_service
        .verify_access_token(token)
        .map_err(|_| unauthorized())?
        .claims;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
