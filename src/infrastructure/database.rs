use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::domain::repositories::RepositoryResult;

/// Opens (creating if needed) the SQLite database and applies migrations
pub async fn connect(database_url: &str, max_connections: u32) -> RepositoryResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Opens a private in-memory database
///
/// A single connection that never expires, since each SQLite connection to
/// `:memory:` sees its own database.
pub async fn connect_in_memory() -> RepositoryResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Applies the embedded migrations
pub async fn migrate(pool: &SqlitePool) -> RepositoryResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("Database migrations applied");
    Ok(())
}
