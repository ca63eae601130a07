use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    #[validate(length(min = 2, message = "Department must be at least 2 characters"))]
    pub department: String,
    #[validate(length(min = 2, message = "Job title must be at least 2 characters"))]
    pub job_title: String,
    pub employment_type: Option<String>,
    pub work_location: Option<String>,
    pub reporting_manager: Option<String>,
    pub hire_date: Option<String>,
    pub status: Option<String>,
    pub basic_salary: Option<f64>,
    pub hra: Option<f64>,
    pub special_allowance: Option<f64>,
    pub conveyance_allowance: Option<f64>,
    pub gross_salary: Option<f64>,
    /// Inline base64 data URLs, stored to disk on create/update.
    pub profile_picture: Option<String>,
    pub experience_cert: Option<String>,
    pub id_proof: Option<String>,
    pub education_cert: Option<String>,
    /// When present, a portal login (users row) is provisioned for the
    /// employee.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    #[validate(length(min = 2, message = "Department must be at least 2 characters"))]
    pub department: Option<String>,
    #[validate(length(min = 2, message = "Job title must be at least 2 characters"))]
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    pub work_location: Option<String>,
    pub reporting_manager: Option<String>,
    pub hire_date: Option<String>,
    pub status: Option<String>,
    pub basic_salary: Option<f64>,
    pub hra: Option<f64>,
    pub special_allowance: Option<f64>,
    pub conveyance_allowance: Option<f64>,
    pub gross_salary: Option<f64>,
    pub profile_picture: Option<String>,
    pub experience_cert: Option<String>,
    pub id_proof: Option<String>,
    pub education_cert: Option<String>,
}
