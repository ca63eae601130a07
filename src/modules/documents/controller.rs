use axum::{
    extract::{Path, Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderName, StatusCode,
    },
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::modules::documents::crud::{DocumentCrud, DocumentError};
use crate::modules::documents::model::Document;
use crate::modules::documents::schema::{
    BulkGenerateRequest, GenerateDocumentRequest, MonthlyStatusQuery, SendDocumentsRequest,
    SendDocumentsResponse, UpdateStatusRequest,
};
use crate::modules::ErrorResponse;
use crate::AppState;

fn reply_err(e: DocumentError) -> (StatusCode, Json<ErrorResponse>) {
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

fn bad_request(e: impl ToString) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
}

/// Renders one document and streams it back as a PDF download without
/// persisting anything.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateDocumentRequest>,
) -> Result<([(HeaderName, String); 2], Vec<u8>), (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = DocumentCrud::new(state.db.clone());
    let bytes = crud
        .generate(
            &req.employee_id,
            &req.doc_type,
            &state.templates,
            req.month.as_deref(),
            req.year,
        )
        .await
        .map_err(reply_err)?;

    let filename = req.doc_type.replace(' ', "_");
    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={filename}.pdf"),
            ),
        ],
        bytes,
    ))
}

pub async fn bulk_generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BulkGenerateRequest>,
) -> Result<(StatusCode, Json<Vec<Document>>), (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = DocumentCrud::new(state.db.clone());
    let created = crud
        .bulk_generate(
            &req.employee_id,
            &req.types,
            &state.templates,
            &state.storage,
            req.month.as_deref(),
            req.year,
        )
        .await
        .map_err(reply_err)?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendDocumentsRequest>,
) -> Result<Json<SendDocumentsResponse>, (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = DocumentCrud::new(state.db.clone());
    crud.send_documents(&req, &state.templates, &state.mailer)
        .await
        .map_err(reply_err)?;

    Ok(Json(SendDocumentsResponse {
        success: true,
        message: "Documents sent successfully",
    }))
}

pub async fn list_by_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
) -> Result<Json<Vec<Document>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = DocumentCrud::new(state.db.clone());
    Ok(Json(crud.find_by_employee(&employee_id).await.map_err(reply_err)?))
}

pub async fn monthly_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthlyStatusQuery>,
) -> Result<Json<Vec<Document>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = DocumentCrud::new(state.db.clone());
    Ok(Json(
        crud.monthly_status(&query.month, query.year)
            .await
            .map_err(reply_err)?,
    ))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Document>, (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = DocumentCrud::new(state.db.clone());
    let document = crud
        .update_status(&id, &req.status, req.rejection_reason.as_deref())
        .await
        .map_err(reply_err)?;

    Ok(Json(document))
}
