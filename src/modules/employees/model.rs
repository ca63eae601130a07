use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Employee record. Serialized directly as the API response (there is nothing
/// secret on it); the camelCase keys double as the data the document
/// templates are rendered against.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub department: String,
    pub job_title: String,
    pub employment_type: Option<String>,
    pub work_location: Option<String>,
    pub reporting_manager: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: String,
    pub basic_salary: Option<f64>,
    pub hra: Option<f64>,
    pub special_allowance: Option<f64>,
    pub conveyance_allowance: Option<f64>,
    pub gross_salary: Option<f64>,
    pub profile_picture: Option<String>,
    pub experience_cert: Option<String>,
    pub id_proof: Option<String>,
    pub education_cert: Option<String>,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
