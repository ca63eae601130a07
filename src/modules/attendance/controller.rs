use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::modules::attendance::crud::{AttendanceCrud, AttendanceError};
use crate::modules::attendance::model::{Attendance, AttendanceWithEmployee};
use crate::modules::attendance::schema::{
    BulkRecordRequest, BulkResult, MonthQuery, RangeQuery, RecordAttendanceRequest,
};
use crate::modules::ErrorResponse;
use crate::AppState;

fn reply_err(e: AttendanceError) -> (StatusCode, Json<ErrorResponse>) {
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

fn bad_request(e: impl ToString) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
}

pub async fn record(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordAttendanceRequest>,
) -> Result<Json<Attendance>, (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = AttendanceCrud::new(state.db.clone());
    Ok(Json(crud.record(&req).await.map_err(reply_err)?))
}

pub async fn bulk_record(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BulkRecordRequest>,
) -> Result<Json<Vec<BulkResult>>, (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = AttendanceCrud::new(state.db.clone());
    Ok(Json(crud.bulk_record(&req.records).await))
}

pub async fn list_in_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<AttendanceWithEmployee>>, (StatusCode, Json<ErrorResponse>)> {
    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(bad_request("startDate and endDate are required"));
    };

    let crud = AttendanceCrud::new(state.db.clone());
    Ok(Json(crud.find_in_range(&start, &end).await.map_err(reply_err)?))
}

pub async fn list_by_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Attendance>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = AttendanceCrud::new(state.db.clone());
    Ok(Json(
        crud.find_by_employee_month(&employee_id, query.month, query.year)
            .await
            .map_err(reply_err)?,
    ))
}
