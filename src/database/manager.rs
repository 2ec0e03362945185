use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// DDL applied at startup (or by `desk migrate`); every statement is idempotent
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Errors from the store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map unique-key violations onto `Conflict` so callers can report them per field
    pub fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatabaseError::Conflict(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() || db.is_check_violation() => {
                DatabaseError::Constraint(db.message().to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Builds the Postgres pool and applies the schema
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(max_connections = config.max_connections, "Created database pool");
        Ok(pool)
    }

    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        // Unparameterised, so sqlx sends the whole script as one simple query
        pool.execute(SCHEMA_SQL).await?;
        info!("Database schema is up to date");
        Ok(())
    }
}
