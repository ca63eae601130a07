use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentRequest {
    #[validate(length(min = 1, message = "employeeId is required"))]
    pub employee_id: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub doc_type: String,
    pub month: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkGenerateRequest {
    #[validate(length(min = 1, message = "employeeId is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "types must not be empty"))]
    pub types: Vec<String>,
    pub month: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendDocumentsRequest {
    #[validate(length(min = 1, message = "employeeId is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "types must not be empty"))]
    pub types: Vec<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub month: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SendDocumentsResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyStatusQuery {
    pub month: String,
    pub year: i64,
}
