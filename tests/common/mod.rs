use std::str::FromStr;

use axum_test::TestServer;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use hrm_api::services::jwt::JwtService;
use hrm_api::services::mailer::Mailer;
use hrm_api::services::storage::FileStorage;
use hrm_api::services::templates::TemplateEngine;

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub db: Pool<Sqlite>,
}

#[allow(dead_code)]
impl TestContext {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory
        // database; a second connection would see an empty one.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid sqlite url")
            .foreign_keys(true);
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("Failed to open test database");

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        let jwt_service = JwtService::new(
            "test-access-secret".to_string(),
            "test-refresh-secret".to_string(),
            "15m",
            "7d",
        );

        let templates = TemplateEngine::from_dir("templates").expect("Failed to load templates");

        let upload_dir =
            std::env::temp_dir().join(format!("hrm-test-uploads-{}", uuid::Uuid::new_v4()));
        let storage = FileStorage::new(upload_dir).expect("Failed to create upload dir");

        let app =
            hrm_api::create_app(db.clone(), jwt_service, templates, Mailer::disabled(), storage)
                .await;
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, db }
    }

    /// Registers a fresh admin user and returns its access token.
    pub async fn login_admin(&self) -> String {
        let email = test_email();

        self.server
            .post("/auth/register")
            .json(&serde_json::json!({
                "email": &email,
                "password": "TestPassword123!",
                "role": "ADMIN"
            }))
            .await;

        let response = self
            .server
            .post("/auth/login")
            .json(&serde_json::json!({
                "email": &email,
                "password": "TestPassword123!"
            }))
            .await;

        let body: serde_json::Value = response.json();
        body["accessToken"]
            .as_str()
            .expect("login should return an access token")
            .to_string()
    }

    /// Creates an employee through the API and returns the response body.
    pub async fn create_employee(&self, token: &str) -> serde_json::Value {
        let response = self
            .server
            .post("/employees")
            .authorization_bearer(token)
            .json(&serde_json::json!({
                "firstName": "Asha",
                "lastName": "Rao",
                "email": test_email(),
                "department": "Engineering",
                "jobTitle": "Software Engineer",
                "hireDate": "2024-03-01",
                "basicSalary": 50000.0,
                "hra": 20000.0,
                "grossSalary": 80000.0
            }))
            .await;

        response.json()
    }
}

// Helper to generate unique test email
#[allow(dead_code)]
pub fn test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "TestPassword123!"
}
