use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::config::DbPool;
use crate::modules::attendance::model::{Attendance, AttendanceWithEmployee};
use crate::modules::attendance::schema::{BulkResult, RecordAttendanceRequest};

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Check-out time must be after check-in time")]
    CheckOutBeforeCheckIn,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AttendanceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmployeeNotFound => StatusCode::NOT_FOUND,
            Self::CheckOutBeforeCheckIn | Self::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct AttendanceCrud {
    pool: DbPool,
}

impl AttendanceCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// One row per employee per day. A second submission for the same day
    /// overwrites the existing row in place.
    pub async fn record(&self, req: &RecordAttendanceRequest) -> Result<Attendance, AttendanceError> {
        let date = parse_date(&req.date)?;

        if let (Some(check_in), Some(check_out)) = (req.check_in, req.check_out) {
            if check_out <= check_in {
                return Err(AttendanceError::CheckOutBeforeCheckIn);
            }
        }

        self.ensure_employee(&req.employee_id).await?;

        let now = Utc::now();
        let attendance: Attendance = sqlx::query_as(
            r#"
            INSERT INTO attendance (id, employee_id, date, status, check_in, check_out, note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (employee_id, date) DO UPDATE SET
                status = excluded.status,
                check_in = excluded.check_in,
                check_out = excluded.check_out,
                note = excluded.note,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&req.employee_id)
        .bind(date)
        .bind(&req.status)
        .bind(req.check_in)
        .bind(req.check_out)
        .bind(&req.note)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendance)
    }

    pub async fn bulk_record(&self, records: &[RecordAttendanceRequest]) -> Vec<BulkResult> {
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            // Each entry gets the same schema checks as the single-record
            // endpoint; a bad entry fails its own slot, not the batch.
            if let Err(e) = record.validate() {
                results.push(BulkResult {
                    employee_id: record.employee_id.clone(),
                    success: false,
                    id: None,
                    error: Some(e.to_string()),
                });
                continue;
            }

            let result = match self.record(record).await {
                Ok(attendance) => BulkResult {
                    employee_id: record.employee_id.clone(),
                    success: true,
                    id: Some(attendance.id),
                    error: None,
                },
                Err(e) => BulkResult {
                    employee_id: record.employee_id.clone(),
                    success: false,
                    id: None,
                    error: Some(e.to_string()),
                },
            };
            results.push(result);
        }
        results
    }

    pub async fn find_in_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<AttendanceWithEmployee>, AttendanceError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        Ok(sqlx::query_as(
            r#"
            SELECT a.*, e.first_name, e.last_name, e.employee_code, e.department, e.job_title
            FROM attendance a
            JOIN employees e ON e.id = a.employee_id
            WHERE a.date >= ? AND a.date <= ?
            ORDER BY a.date DESC, e.employee_code
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn find_by_employee_month(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Attendance>, AttendanceError> {
        self.ensure_employee(employee_id).await?;

        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AttendanceError::InvalidDate(format!("{year}-{month}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| AttendanceError::InvalidDate(format!("{year}-{month}")))?;

        Ok(sqlx::query_as(
            r#"
            SELECT * FROM attendance
            WHERE employee_id = ? AND date >= ? AND date < ?
            ORDER BY date
            "#,
        )
        .bind(employee_id)
        .bind(first)
        .bind(next)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn ensure_employee(&self, id: &str) -> Result<(), AttendanceError> {
        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(AttendanceError::EmployeeNotFound);
        }
        Ok(())
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; timestamps are truncated to
/// their calendar day.
fn parse_date(value: &str) -> Result<NaiveDate, AttendanceError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(stamp.date_naive());
    }

    Err(AttendanceError::InvalidDate(value.to_string()))
}
