//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StorageError;

/// Manages a single SQLite pool; creates DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database path, or an in-memory database for
    /// `:memory:` / `sqlite::memory:`.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        info!("Initializing SQLite pool: {}", database_url);

        let pool = if Self::is_memory(database_url) {
            // Every connection to :memory: is a separate database, so pin the pool to one.
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await
        } else {
            let options = SqliteConnectOptions::new()
                .create_if_missing(true)
                .filename(database_url);
            SqlitePool::connect_with(options).await
        }
        .map_err(|e| StorageError::Unavailable(format!("{}: {}", database_url, e)))?;

        Ok(Self { pool })
    }

    fn is_memory(database_url: &str) -> bool {
        matches!(database_url, ":memory:" | "sqlite::memory:")
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
