use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attendance row joined with the owning employee, for the admin register
/// view.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithEmployee {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attendance: Attendance,
    pub first_name: String,
    pub last_name: String,
    pub employee_code: String,
    pub department: String,
    pub job_title: String,
}
