//! Database connection pool and migration management.
//!
//! This module provides utilities for:
//! - Creating and managing a SQLite connection pool
//! - Running database migrations automatically

use std::time::Duration;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<Sqlite>;

/// How long a connection waits on the database write lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a new SQLite connection pool.
///
/// # Arguments
///
/// * `database_path` - Path of the SQLite database file (created if missing)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Configuration
///
/// - WAL journal, so readers are never blocked by the single writer
/// - Foreign keys enforced
/// - Busy timeout of 5 seconds, so concurrent writers queue instead of failing
///
/// # Errors
///
/// Returns an error if the file cannot be opened or created.
pub async fn create_pool(database_path: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migrations are tracked in the `_sqlx_migrations` table, so each one runs only once.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migrations at compile time from ./migrations directory
    sqlx::migrate!("./migrations").run(pool).await
}

/// Fresh, migrated database in a temporary directory.
///
/// The directory is removed when the returned guard is dropped.
#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, DbPool) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let pool = create_pool(path.to_str().unwrap(), 5).await.unwrap();
    run_migrations(&pool).await.unwrap();
    (dir, pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_create_both_tables() {
        let (_dir, pool) = test_pool().await;

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('accounts', 'transfers') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(tables, vec!["accounts", "transfers"]);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let (_dir, pool) = test_pool().await;
        run_migrations(&pool).await.unwrap();
    }
}
