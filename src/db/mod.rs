pub mod feedback;
pub mod menu;
pub mod migrate;
pub mod models;
pub mod users;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::config::Config;
use crate::error::AppError;

/// Connects the pool, applies pending migrations, and runs the one-time
/// admin bootstrap. The only place schema or account setup happens.
pub async fn init(config: &Config) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await?;

    migrate::run(&pool).await?;
    users::bootstrap_admin(&pool, &config.admin_user, &config.admin_pass).await?;

    Ok(pool)
}

/// Migrated in-memory database for tests. Single connection, since every
/// `:memory:` connection is its own database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    migrate::run(&pool).await.expect("migrations");
    pool
}
