use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::config::DbPool;
use crate::modules::employees::model::Employee;
use crate::modules::employees::schema::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::services::hashing;
use crate::services::storage::{FileStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    #[error("Employee with this email already exists")]
    EmailTaken,

    #[error("Email already in use")]
    UserEmailTaken,

    #[error("Employee not found")]
    NotFound,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("File storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl EmployeeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmailTaken | Self::UserEmailTaken => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidDate(_) | Self::Storage(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Uploaded credential files recorded alongside a new employee. Document type
/// per column keeps the review UI stable.
const CREDENTIAL_TYPES: &[(&str, &str)] = &[
    ("experience_cert", "EXPERIENCE_CERTIFICATE"),
    ("id_proof", "ID_PROOF"),
    ("education_cert", "EDUCATION_CERTIFICATE"),
];

pub struct EmployeeCrud {
    pool: DbPool,
}

impl EmployeeCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Employee>, EmployeeError> {
        Ok(
            sqlx::query_as("SELECT * FROM employees ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, EmployeeError> {
        Ok(sqlx::query_as("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, EmployeeError> {
        Ok(sqlx::query_as("SELECT * FROM employees WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn create(
        &self,
        req: CreateEmployeeRequest,
        storage: &FileStorage,
    ) -> Result<Employee, EmployeeError> {
        if self.find_by_email(&req.email).await?.is_some() {
            return Err(EmployeeError::EmailTaken);
        }

        let profile_picture = self.store_file(storage, req.profile_picture.as_deref(), "profiles")?;
        let experience_cert =
            self.store_file(storage, req.experience_cert.as_deref(), "certificates")?;
        let id_proof = self.store_file(storage, req.id_proof.as_deref(), "certificates")?;
        let education_cert =
            self.store_file(storage, req.education_cert.as_deref(), "certificates")?;

        let user_id = match &req.password {
            Some(password) => Some(self.provision_user(&req.email, password).await?),
            None => None,
        };

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            employee_code: self.next_employee_code().await?,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            date_of_birth: parse_date_opt(req.date_of_birth.as_deref())?,
            department: req.department,
            job_title: req.job_title,
            employment_type: req.employment_type,
            work_location: req.work_location,
            reporting_manager: req.reporting_manager,
            hire_date: parse_date_opt(req.hire_date.as_deref())?,
            status: req.status.unwrap_or_else(|| "Active".to_string()),
            basic_salary: req.basic_salary,
            hra: req.hra,
            special_allowance: req.special_allowance,
            conveyance_allowance: req.conveyance_allowance,
            gross_salary: req.gross_salary,
            profile_picture,
            experience_cert,
            id_proof,
            education_cert,
            user_id,
            created_at: now,
            updated_at: now,
        };

        self.insert(&employee).await?;
        self.record_credential_documents(&employee).await?;

        Ok(employee)
    }

    pub async fn update(
        &self,
        id: &str,
        req: UpdateEmployeeRequest,
        storage: &FileStorage,
    ) -> Result<Employee, EmployeeError> {
        let existing = self.find_by_id(id).await?.ok_or(EmployeeError::NotFound)?;

        let profile_picture = match req.profile_picture.as_deref() {
            Some(data) => self.store_file(storage, Some(data), "profiles")?,
            None => existing.profile_picture,
        };
        let experience_cert = match req.experience_cert.as_deref() {
            Some(data) => self.store_file(storage, Some(data), "certificates")?,
            None => existing.experience_cert,
        };
        let id_proof = match req.id_proof.as_deref() {
            Some(data) => self.store_file(storage, Some(data), "certificates")?,
            None => existing.id_proof,
        };
        let education_cert = match req.education_cert.as_deref() {
            Some(data) => self.store_file(storage, Some(data), "certificates")?,
            None => existing.education_cert,
        };

        let updated = Employee {
            id: existing.id,
            employee_code: existing.employee_code,
            first_name: req.first_name.unwrap_or(existing.first_name),
            last_name: req.last_name.unwrap_or(existing.last_name),
            email: req.email.unwrap_or(existing.email),
            phone: req.phone.or(existing.phone),
            address: req.address.or(existing.address),
            date_of_birth: parse_date_opt(req.date_of_birth.as_deref())?
                .or(existing.date_of_birth),
            department: req.department.unwrap_or(existing.department),
            job_title: req.job_title.unwrap_or(existing.job_title),
            employment_type: req.employment_type.or(existing.employment_type),
            work_location: req.work_location.or(existing.work_location),
            reporting_manager: req.reporting_manager.or(existing.reporting_manager),
            hire_date: parse_date_opt(req.hire_date.as_deref())?.or(existing.hire_date),
            status: req.status.unwrap_or(existing.status),
            basic_salary: req.basic_salary.or(existing.basic_salary),
            hra: req.hra.or(existing.hra),
            special_allowance: req.special_allowance.or(existing.special_allowance),
            conveyance_allowance: req.conveyance_allowance.or(existing.conveyance_allowance),
            gross_salary: req.gross_salary.or(existing.gross_salary),
            profile_picture,
            experience_cert,
            id_proof,
            education_cert,
            user_id: existing.user_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            UPDATE employees SET
                first_name = ?, last_name = ?, email = ?, phone = ?, address = ?,
                date_of_birth = ?, department = ?, job_title = ?, employment_type = ?,
                work_location = ?, reporting_manager = ?, hire_date = ?, status = ?,
                basic_salary = ?, hra = ?, special_allowance = ?, conveyance_allowance = ?,
                gross_salary = ?, profile_picture = ?, experience_cert = ?, id_proof = ?,
                education_cert = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&updated.first_name)
        .bind(&updated.last_name)
        .bind(&updated.email)
        .bind(&updated.phone)
        .bind(&updated.address)
        .bind(updated.date_of_birth)
        .bind(&updated.department)
        .bind(&updated.job_title)
        .bind(&updated.employment_type)
        .bind(&updated.work_location)
        .bind(&updated.reporting_manager)
        .bind(updated.hire_date)
        .bind(&updated.status)
        .bind(updated.basic_salary)
        .bind(updated.hra)
        .bind(updated.special_allowance)
        .bind(updated.conveyance_allowance)
        .bind(updated.gross_salary)
        .bind(&updated.profile_picture)
        .bind(&updated.experience_cert)
        .bind(&updated.id_proof)
        .bind(&updated.education_cert)
        .bind(updated.updated_at)
        .bind(&updated.id)
        .execute(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), EmployeeError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(EmployeeError::NotFound);
        }

        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    fn store_file(
        &self,
        storage: &FileStorage,
        data: Option<&str>,
        folder: &str,
    ) -> Result<Option<String>, EmployeeError> {
        match data {
            Some(data) => Ok(storage.save_data_url(data, folder)?),
            None => Ok(None),
        }
    }

    async fn provision_user(&self, email: &str, password: &str) -> Result<String, EmployeeError> {
        let taken: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        if taken.0 > 0 {
            return Err(EmployeeError::UserEmailTaken);
        }

        let password_hash =
            hashing::hash_password(password).map_err(|e| EmployeeError::Hashing(e.to_string()))?;

        let user_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, 'EMPLOYEE', ?, ?)
            "#,
        )
        .bind(&user_id)
        .bind(email)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(user_id)
    }

    /// Sequential display codes: EMM0001, EMM0002, ...
    async fn next_employee_code(&self) -> Result<String, EmployeeError> {
        let last: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT employee_code FROM employees
            WHERE employee_code LIKE 'EMM%'
            ORDER BY employee_code DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let next = last
            .and_then(|(code,)| code.strip_prefix("EMM").and_then(|n| n.parse::<u32>().ok()))
            .map(|n| n + 1)
            .unwrap_or(1);

        Ok(format!("EMM{:04}", next))
    }

    async fn insert(&self, e: &Employee) -> Result<(), EmployeeError> {
        sqlx::query(
            r#"
            INSERT INTO employees (
                id, employee_code, first_name, last_name, email, phone, address,
                date_of_birth, department, job_title, employment_type, work_location,
                reporting_manager, hire_date, status, basic_salary, hra,
                special_allowance, conveyance_allowance, gross_salary, profile_picture,
                experience_cert, id_proof, education_cert, user_id, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&e.id)
        .bind(&e.employee_code)
        .bind(&e.first_name)
        .bind(&e.last_name)
        .bind(&e.email)
        .bind(&e.phone)
        .bind(&e.address)
        .bind(e.date_of_birth)
        .bind(&e.department)
        .bind(&e.job_title)
        .bind(&e.employment_type)
        .bind(&e.work_location)
        .bind(&e.reporting_manager)
        .bind(e.hire_date)
        .bind(&e.status)
        .bind(e.basic_salary)
        .bind(e.hra)
        .bind(e.special_allowance)
        .bind(e.conveyance_allowance)
        .bind(e.gross_salary)
        .bind(&e.profile_picture)
        .bind(&e.experience_cert)
        .bind(&e.id_proof)
        .bind(&e.education_cert)
        .bind(&e.user_id)
        .bind(e.created_at)
        .bind(e.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if err.to_string().contains("UNIQUE") {
                EmployeeError::EmailTaken
            } else {
                EmployeeError::Database(err)
            }
        })?;

        Ok(())
    }

    async fn record_credential_documents(&self, employee: &Employee) -> Result<(), EmployeeError> {
        for (column, doc_type) in CREDENTIAL_TYPES {
            let path = match *column {
                "experience_cert" => employee.experience_cert.as_deref(),
                "id_proof" => employee.id_proof.as_deref(),
                _ => employee.education_cert.as_deref(),
            };
            let Some(path) = path else { continue };

            sqlx::query(
                r#"
                INSERT INTO documents (id, doc_type, employee_id, status, category, file_path, created_at)
                VALUES (?, ?, ?, 'Pending', 'UPLOADED', ?, ?)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(doc_type)
            .bind(&employee.id)
            .bind(path)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
fn parse_date_opt(value: Option<&str>) -> Result<Option<NaiveDate>, EmployeeError> {
    let Some(value) = value else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(Some(stamp.date_naive()));
    }

    Err(EmployeeError::InvalidDate(value.to_string()))
}
