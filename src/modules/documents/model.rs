use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub employee_id: String,
    pub status: String,
    pub category: String,
    pub file_path: Option<String>,
    pub rejection_reason: Option<String>,
    pub month: Option<String>,
    pub year: Option<i64>,
    pub created_at: DateTime<Utc>,
}
