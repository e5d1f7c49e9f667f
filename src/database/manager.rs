use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::config;
use crate::database::store::StoreError;

/// Build the connection pool from DATABASE_URL with config-driven options.
pub async fn connect() -> Result<PgPool, StoreError> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| StoreError::Unavailable("DATABASE_URL is not set".to_string()))?;

    let database = &config::config().database;
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(database.connect_timeout_secs))
        .connect(&url)
        .await?;

    info!("created database pool ({} max connections)", database.max_connections);
    Ok(pool)
}
