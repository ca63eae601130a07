use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::DbPool;
use crate::modules::documents::model::Document;
use crate::modules::documents::schema::SendDocumentsRequest;
use crate::modules::employees::model::Employee;
use crate::services::mailer::{MailAttachment, MailError, Mailer};
use crate::services::pdf::{self, PdfError};
use crate::services::storage::{FileStorage, StorageError};
use crate::services::templates::{format_inr, TemplateEngine, TemplateError};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Document not found")]
    NotFound,

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template render error: {0}")]
    Template(String),

    #[error("PDF generation error: {0}")]
    Pdf(#[from] PdfError),

    #[error("File storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Email error: {0}")]
    Mail(#[from] MailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<TemplateError> for DocumentError {
    fn from(e: TemplateError) -> Self {
        match e {
            TemplateError::NotFound(name) => Self::TemplateNotFound(name),
            other => Self::Template(other.to_string()),
        }
    }
}

impl DocumentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmployeeNotFound | Self::NotFound | Self::TemplateNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Template(_)
            | Self::Pdf(_)
            | Self::Storage(_)
            | Self::Mail(_)
            | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct DocumentCrud {
    pool: DbPool,
}

impl DocumentCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_employee(&self, employee_id: &str) -> Result<Vec<Document>, DocumentError> {
        Ok(sqlx::query_as(
            "SELECT * FROM documents WHERE employee_id = ? ORDER BY created_at DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Payslips already dispatched for a period; drives the send/pending
    /// column in the payroll dashboard.
    pub async fn monthly_status(&self, month: &str, year: i64) -> Result<Vec<Document>, DocumentError> {
        Ok(sqlx::query_as(
            r#"
            SELECT * FROM documents
            WHERE doc_type = 'PAYSLIP' AND status = 'Sent' AND month = ? AND year = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(month)
        .bind(year)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Free-form status overwrite. The rejection reason is only meaningful on
    /// a Rejected row and is cleared on any other transition.
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        rejection_reason: Option<&str>,
    ) -> Result<Document, DocumentError> {
        let reason = if status == "Rejected" {
            rejection_reason
        } else {
            None
        };

        let result = sqlx::query("UPDATE documents SET status = ?, rejection_reason = ? WHERE id = ?")
            .bind(status)
            .bind(reason)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DocumentError::NotFound);
        }

        Ok(sqlx::query_as("SELECT * FROM documents WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Renders a named template for an employee and converts it to PDF bytes.
    pub async fn generate(
        &self,
        employee_id: &str,
        doc_type: &str,
        templates: &TemplateEngine,
        month: Option<&str>,
        year: Option<i64>,
    ) -> Result<Vec<u8>, DocumentError> {
        let employee = self.load_employee(employee_id).await?;
        let html = render_document(&employee, doc_type, templates, month, year)?;
        Ok(pdf::html_to_pdf(&html)?)
    }

    /// Render + convert + persist one record per requested type. Each PDF is
    /// stored under the uploads directory so it can be re-downloaded later.
    pub async fn bulk_generate(
        &self,
        employee_id: &str,
        types: &[String],
        templates: &TemplateEngine,
        storage: &FileStorage,
        month: Option<&str>,
        year: Option<i64>,
    ) -> Result<Vec<Document>, DocumentError> {
        let employee = self.load_employee(employee_id).await?;

        let mut created = Vec::with_capacity(types.len());
        for doc_type in types {
            let html = render_document(&employee, doc_type, templates, month, year)?;
            let bytes = pdf::html_to_pdf(&html)?;
            let file_path = storage.save_bytes(&bytes, "documents", "pdf")?;
            let record = self
                .create_record(&employee.id, doc_type, "Generated", "GENERATED", Some(&file_path), month, year)
                .await?;
            created.push(record);
        }

        Ok(created)
    }

    /// Renders every requested type, records each as Sent, then dispatches a
    /// single email carrying all attachments. The records are written before
    /// the dispatch, so a mail failure leaves Sent rows behind with no
    /// delivered email; callers surface the failure as a 500.
    pub async fn send_documents(
        &self,
        req: &SendDocumentsRequest,
        templates: &TemplateEngine,
        mailer: &Mailer,
    ) -> Result<(), DocumentError> {
        let employee = self.load_employee(&req.employee_id).await?;

        let mut attachments = Vec::with_capacity(req.types.len());
        for doc_type in &req.types {
            let html = render_document(
                &employee,
                doc_type,
                templates,
                req.month.as_deref(),
                req.year,
            )?;
            let bytes = pdf::html_to_pdf(&html)?;

            attachments.push(MailAttachment {
                filename: format!("{}.pdf", doc_type.replace(' ', "_")),
                content: bytes,
                content_type: "application/pdf",
            });

            self.create_record(
                &employee.id,
                doc_type,
                "Sent",
                "GENERATED",
                None,
                req.month.as_deref(),
                req.year,
            )
            .await?;
        }

        let subject = req.subject.as_deref().unwrap_or("Employee Documents - HRM HUB");
        let default_body = format!(
            "Dear {}, please find the attached documents.",
            employee.first_name
        );
        let body = req.message.as_deref().unwrap_or(&default_body);

        mailer.send(&employee.email, subject, body, attachments).await?;
        Ok(())
    }

    /// Used for the onboarding offer letter; stores the PDF and records it.
    pub async fn auto_generate(
        &self,
        employee: &Employee,
        doc_type: &str,
        templates: &TemplateEngine,
        storage: &FileStorage,
    ) -> Result<Document, DocumentError> {
        let html = render_document(employee, doc_type, templates, None, None)?;
        let bytes = pdf::html_to_pdf(&html)?;
        let file_path = storage.save_bytes(&bytes, "documents", "pdf")?;

        self.create_record(&employee.id, doc_type, "Generated", "GENERATED", Some(&file_path), None, None)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn create_record(
        &self,
        employee_id: &str,
        doc_type: &str,
        status: &str,
        category: &str,
        file_path: Option<&str>,
        month: Option<&str>,
        year: Option<i64>,
    ) -> Result<Document, DocumentError> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            doc_type: doc_type.to_string(),
            employee_id: employee_id.to_string(),
            status: status.to_string(),
            category: category.to_string(),
            file_path: file_path.map(str::to_string),
            rejection_reason: None,
            month: month.map(str::to_string),
            year,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO documents (id, doc_type, employee_id, status, category, file_path, month, year, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&document.id)
        .bind(&document.doc_type)
        .bind(&document.employee_id)
        .bind(&document.status)
        .bind(&document.category)
        .bind(&document.file_path)
        .bind(&document.month)
        .bind(document.year)
        .bind(document.created_at)
        .execute(&self.pool)
        .await?;

        Ok(document)
    }

    async fn load_employee(&self, id: &str) -> Result<Employee, DocumentError> {
        sqlx::query_as("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DocumentError::EmployeeNotFound)
    }
}

fn render_document(
    employee: &Employee,
    doc_type: &str,
    templates: &TemplateEngine,
    month: Option<&str>,
    year: Option<i64>,
) -> Result<String, DocumentError> {
    let data = template_data(employee, month, year)
        .map_err(|e| DocumentError::Template(e.to_string()))?;
    Ok(templates.render(doc_type, &data)?)
}

/// Template context: the employee's own (camelCase) fields plus computed
/// display values the letter bodies rely on.
fn template_data(
    employee: &Employee,
    month: Option<&str>,
    year: Option<i64>,
) -> Result<Value, serde_json::Error> {
    let now = Utc::now();
    let mut data = serde_json::to_value(employee)?;

    if let Some(map) = data.as_object_mut() {
        map.insert(
            "fullName".into(),
            json!(format!("{} {}", employee.first_name, employee.last_name)),
        );
        map.insert("date".into(), json!(now.format("%-d %B %Y").to_string()));
        map.insert(
            "month".into(),
            json!(month
                .map(str::to_string)
                .unwrap_or_else(|| now.format("%B").to_string())),
        );
        map.insert("year".into(), json!(year.unwrap_or(now.year() as i64)));
        map.insert(
            "hireDate".into(),
            json!(employee
                .hire_date
                .map(|d| d.format("%-d %B %Y").to_string())
                .unwrap_or_else(|| "N/A".to_string())),
        );
        map.insert(
            "timestamp".into(),
            json!(now.format("%-d %b %Y, %I:%M:%S %p").to_string()),
        );

        let formatted = [
            ("basicSalaryFormatted", employee.basic_salary),
            ("hraFormatted", employee.hra),
            ("specialAllowanceFormatted", employee.special_allowance),
            ("conveyanceAllowanceFormatted", employee.conveyance_allowance),
            ("grossSalaryFormatted", employee.gross_salary),
            ("annualGrossSalaryFormatted", employee.gross_salary.map(|g| g * 12.0)),
        ];
        for (key, value) in formatted {
            if let Some(value) = value {
                map.insert(key.into(), json!(format_inr(value)));
            }
        }
    }

    Ok(data)
}
