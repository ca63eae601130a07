use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::modules::documents::crud::DocumentCrud;
use crate::modules::employees::crud::{EmployeeCrud, EmployeeError};
use crate::modules::employees::model::Employee;
use crate::modules::employees::schema::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::modules::ErrorResponse;
use crate::AppState;

fn reply_err(e: EmployeeError) -> (StatusCode, Json<ErrorResponse>) {
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = EmployeeCrud::new(state.db.clone());
    Ok(Json(crud.find_all().await.map_err(reply_err)?))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, (StatusCode, Json<ErrorResponse>)> {
    let crud = EmployeeCrud::new(state.db.clone());
    let employee = crud
        .find_by_id(&id)
        .await
        .map_err(reply_err)?
        .ok_or_else(|| reply_err(EmployeeError::NotFound))?;
    Ok(Json(employee))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))));
    }

    let crud = EmployeeCrud::new(state.db.clone());
    let employee = crud.create(req, &state.storage).await.map_err(reply_err)?;

    // Best-effort: a failed offer letter must never block onboarding.
    let documents = DocumentCrud::new(state.db.clone());
    if let Err(e) = documents
        .auto_generate(&employee, "OFFER_LETTER", &state.templates, &state.storage)
        .await
    {
        tracing::warn!(employee_id = %employee.id, "offer letter generation failed: {}", e);
    }

    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))));
    }

    let crud = EmployeeCrud::new(state.db.clone());
    let employee = crud.update(&id, req, &state.storage).await.map_err(reply_err)?;
    Ok(Json(employee))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let crud = EmployeeCrud::new(state.db.clone());
    crud.delete(&id).await.map_err(reply_err)?;
    Ok(StatusCode::NO_CONTENT)
}
