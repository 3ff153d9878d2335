//! Database connection management

use std::time::Duration;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use crate::config::DatabaseConfig;
use crate::utils::errors::PereirinhaError;

pub type DatabasePool = Pool<Postgres>;

/// Pool limits and timeouts taken from the `database` settings section
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
        .max_lifetime(config.max_lifetime_seconds.map(Duration::from_secs))
}

/// Connect and verify the pool with a round trip
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, PereirinhaError> {
    let pool = pool_options(config).connect(&config.url).await?;
    health_check(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), PereirinhaError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<(), PereirinhaError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_pool_options_follow_settings() {
        let mut config = Settings::default().database;
        config.max_connections = 4;
        config.acquire_timeout_seconds = 5;
        config.idle_timeout_seconds = Some(120);
        config.max_lifetime_seconds = None;

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(5));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(120)));
        assert_eq!(options.get_max_lifetime(), None);
    }
}
