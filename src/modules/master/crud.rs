use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use crate::config::DbPool;
use crate::modules::master::model::{
    City, CompanyConfig, Country, CountryWithCount, State, StateWithCount,
};
use crate::services::storage::{FileStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum MasterError {
    #[error("Not found")]
    NotFound,

    #[error("Country not found")]
    CountryNotFound,

    #[error("State not found")]
    StateNotFound,

    #[error("Invalid or unsupported image data")]
    InvalidFile,

    #[error("File storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl MasterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::CountryNotFound | Self::StateNotFound => StatusCode::NOT_FOUND,
            Self::InvalidFile => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct MasterCrud {
    pool: DbPool,
}

impl MasterCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Singleton row, created lazily the first time anything asks for it.
    pub async fn get_config(&self) -> Result<CompanyConfig, MasterError> {
        if let Some(config) = sqlx::query_as("SELECT * FROM company_config LIMIT 1")
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(config);
        }

        let config = CompanyConfig {
            id: Uuid::new_v4().to_string(),
            logo_path: None,
            updated_at: Utc::now(),
        };
        sqlx::query("INSERT INTO company_config (id, logo_path, updated_at) VALUES (?, ?, ?)")
            .bind(&config.id)
            .bind(&config.logo_path)
            .bind(config.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(config)
    }

    pub async fn update_logo(
        &self,
        data_url: &str,
        storage: &FileStorage,
    ) -> Result<CompanyConfig, MasterError> {
        let logo_path = storage
            .save_data_url(data_url, "company")?
            .ok_or(MasterError::InvalidFile)?;

        let mut config = self.get_config().await?;
        if let Some(old) = &config.logo_path {
            storage.remove(old);
        }

        config.logo_path = Some(logo_path);
        config.updated_at = Utc::now();
        sqlx::query("UPDATE company_config SET logo_path = ?, updated_at = ? WHERE id = ?")
            .bind(&config.logo_path)
            .bind(config.updated_at)
            .bind(&config.id)
            .execute(&self.pool)
            .await?;

        Ok(config)
    }

    pub async fn clear_logo(&self, storage: &FileStorage) -> Result<CompanyConfig, MasterError> {
        let mut config = self.get_config().await?;
        if let Some(old) = config.logo_path.take() {
            storage.remove(&old);
        }

        config.updated_at = Utc::now();
        sqlx::query("UPDATE company_config SET logo_path = NULL, updated_at = ? WHERE id = ?")
            .bind(config.updated_at)
            .bind(&config.id)
            .execute(&self.pool)
            .await?;

        Ok(config)
    }

    pub async fn list_countries(&self) -> Result<Vec<CountryWithCount>, MasterError> {
        Ok(sqlx::query_as(
            r#"
            SELECT c.*, COUNT(s.id) AS state_count
            FROM countries c
            LEFT JOIN states s ON s.country_id = c.id
            GROUP BY c.id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn create_country(&self, name: &str) -> Result<Country, MasterError> {
        let country = Country {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        sqlx::query("INSERT INTO countries (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&country.id)
            .bind(&country.name)
            .bind(country.created_at)
            .execute(&self.pool)
            .await?;
        Ok(country)
    }

    pub async fn delete_country(&self, id: &str) -> Result<(), MasterError> {
        let result = sqlx::query("DELETE FROM countries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(MasterError::NotFound);
        }
        Ok(())
    }

    pub async fn list_states(&self, country_id: &str) -> Result<Vec<StateWithCount>, MasterError> {
        Ok(sqlx::query_as(
            r#"
            SELECT s.*, COUNT(ci.id) AS city_count
            FROM states s
            LEFT JOIN cities ci ON ci.state_id = s.id
            WHERE s.country_id = ?
            GROUP BY s.id
            ORDER BY s.name
            "#,
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn create_state(&self, name: &str, country_id: &str) -> Result<State, MasterError> {
        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM countries WHERE id = ?")
            .bind(country_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(MasterError::CountryNotFound);
        }

        let state = State {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            country_id: country_id.to_string(),
            created_at: Utc::now(),
        };
        sqlx::query("INSERT INTO states (id, name, country_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(&state.id)
            .bind(&state.name)
            .bind(&state.country_id)
            .bind(state.created_at)
            .execute(&self.pool)
            .await?;
        Ok(state)
    }

    pub async fn delete_state(&self, id: &str) -> Result<(), MasterError> {
        let result = sqlx::query("DELETE FROM states WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(MasterError::NotFound);
        }
        Ok(())
    }

    pub async fn list_cities(&self, state_id: &str) -> Result<Vec<City>, MasterError> {
        Ok(
            sqlx::query_as("SELECT * FROM cities WHERE state_id = ? ORDER BY name")
                .bind(state_id)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn create_city(&self, name: &str, state_id: &str) -> Result<City, MasterError> {
        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM states WHERE id = ?")
            .bind(state_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(MasterError::StateNotFound);
        }

        let city = City {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            state_id: state_id.to_string(),
            created_at: Utc::now(),
        };
        sqlx::query("INSERT INTO cities (id, name, state_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(&city.id)
            .bind(&city.name)
            .bind(&city.state_id)
            .bind(city.created_at)
            .execute(&self.pool)
            .await?;
        Ok(city)
    }

    pub async fn delete_city(&self, id: &str) -> Result<(), MasterError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(MasterError::NotFound);
        }
        Ok(())
    }
}
