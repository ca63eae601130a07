use hrm_api::config::{environment::Config, init_db};
use hrm_api::services::jwt::JwtService;
use hrm_api::services::mailer::Mailer;
use hrm_api::services::storage::FileStorage;
use hrm_api::services::templates::TemplateEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hrm_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url).await;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Connected to SQLite");

    let jwt_service = JwtService::new(
        config.jwt_access_secret,
        config.jwt_refresh_secret,
        &config.access_ttl,
        &config.refresh_ttl,
    );

    let templates =
        TemplateEngine::from_dir(&config.templates_dir).expect("Failed to load document templates");

    let mailer = Mailer::new(
        config.smtp_host.as_deref(),
        config.smtp_port,
        &config.smtp_user,
        &config.smtp_pass,
        &config.smtp_from,
    );
    if config.smtp_host.is_none() {
        tracing::warn!("SMTP_HOST not set, outgoing email is disabled");
    }

    let storage = FileStorage::new(&config.upload_dir).expect("Failed to create upload directory");

    let app = hrm_api::create_app(db, jwt_service, templates, mailer, storage).await;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await.unwrap();
}
