use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceRequest {
    #[validate(length(min = 1, message = "employeeId is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkRecordRequest {
    #[validate(length(min = 1, message = "records must not be empty"))]
    pub records: Vec<RecordAttendanceRequest>,
}

/// Per-record outcome for a bulk submission; failures never abort the batch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResult {
    pub employee_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: u32,
    pub year: i32,
}
