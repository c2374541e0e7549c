//! Message repository: SQLite persistence for published and received messages.
//!
//! Uses SqlitePoolManager and the models (PublishedMessage, ReceivedMessage).
//! Readers go through [`PublishedTable`] / [`ReceivedTable`], which implement
//! [`MessageCollection`]; inserts exist for the delivery side and for seeding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::collection::MessageCollection;
use crate::error::StorageError;
use crate::models::{PublishedMessage, ReceivedMessage, StatusName};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating message tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS published (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                content TEXT NOT NULL,
                added TEXT NOT NULL,
                expires_at TEXT,
                retries INTEGER NOT NULL DEFAULT 0,
                status_name TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS received (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                group_name TEXT NOT NULL,
                content TEXT NOT NULL,
                added TEXT NOT NULL,
                expires_at TEXT,
                retries INTEGER NOT NULL DEFAULT 0,
                status_name TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_published_status_name ON published(status_name);
            CREATE INDEX IF NOT EXISTS idx_published_added ON published(added);
            CREATE INDEX IF NOT EXISTS idx_received_status_name ON received(status_name);
            CREATE INDEX IF NOT EXISTS idx_received_added ON received(added);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Message tables created successfully");
        Ok(())
    }

    pub async fn save_published(&self, message: &PublishedMessage) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO published (id, name, content, added, expires_at, retries, status_name)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.content)
        .bind(message.added)
        .bind(message.expires_at)
        .bind(message.retries)
        .bind(message.status_name.as_str())
        .execute(pool)
        .await?;

        info!(
            "Saved published message: id={}, name={}, status={}",
            message.id, message.name, message.status_name
        );
        Ok(())
    }

    pub async fn save_received(&self, message: &ReceivedMessage) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO received
                (id, name, group_name, content, added, expires_at, retries, status_name)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.group)
        .bind(&message.content)
        .bind(message.added)
        .bind(message.expires_at)
        .bind(message.retries)
        .bind(message.status_name.as_str())
        .execute(pool)
        .await?;

        info!(
            "Saved received message: id={}, name={}, group={}, status={}",
            message.id, message.name, message.group, message.status_name
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn pool_manager(&self) -> &SqlitePoolManager {
        &self.pool_manager
    }

    /// Read handle over the `published` table.
    pub fn published(&self) -> PublishedTable {
        PublishedTable {
            pool_manager: self.pool_manager.clone(),
        }
    }

    /// Read handle over the `received` table.
    pub fn received(&self) -> ReceivedTable {
        ReceivedTable {
            pool_manager: self.pool_manager.clone(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct PublishedRow {
    id: String,
    name: String,
    content: String,
    added: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    retries: i32,
    status_name: String,
}

impl TryFrom<PublishedRow> for PublishedMessage {
    type Error = StorageError;

    fn try_from(row: PublishedRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status_name: row.status_name.parse()?,
            id: row.id,
            name: row.name,
            content: row.content,
            added: row.added,
            expires_at: row.expires_at,
            retries: row.retries,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReceivedRow {
    id: String,
    name: String,
    group_name: String,
    content: String,
    added: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    retries: i32,
    status_name: String,
}

impl TryFrom<ReceivedRow> for ReceivedMessage {
    type Error = StorageError;

    fn try_from(row: ReceivedRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status_name: row.status_name.parse()?,
            id: row.id,
            name: row.name,
            group: row.group_name,
            content: row.content,
            added: row.added,
            expires_at: row.expires_at,
            retries: row.retries,
        })
    }
}

/// `published` table as a [`MessageCollection`].
#[derive(Clone)]
pub struct PublishedTable {
    pool_manager: SqlitePoolManager,
}

#[async_trait]
impl MessageCollection<PublishedMessage> for PublishedTable {
    async fn find_one(&self, id: &str) -> Result<Option<PublishedMessage>, StorageError> {
        let row = sqlx::query_as::<_, PublishedRow>("SELECT * FROM published WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        row.map(PublishedMessage::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<PublishedMessage>, StorageError> {
        let rows = sqlx::query_as::<_, PublishedRow>("SELECT * FROM published ORDER BY rowid")
            .fetch_all(self.pool_manager.pool())
            .await?;
        debug!("Retrieved {} published messages", rows.len());

        rows.into_iter().map(PublishedMessage::try_from).collect()
    }

    async fn count(&self, status: StatusName) -> Result<i64, StorageError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM published WHERE status_name = ?")
            .bind(status.as_str())
            .fetch_one(self.pool_manager.pool())
            .await?;

        Ok(count.0)
    }
}

/// `received` table as a [`MessageCollection`].
#[derive(Clone)]
pub struct ReceivedTable {
    pool_manager: SqlitePoolManager,
}

#[async_trait]
impl MessageCollection<ReceivedMessage> for ReceivedTable {
    async fn find_one(&self, id: &str) -> Result<Option<ReceivedMessage>, StorageError> {
        let row = sqlx::query_as::<_, ReceivedRow>("SELECT * FROM received WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        row.map(ReceivedMessage::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<ReceivedMessage>, StorageError> {
        let rows = sqlx::query_as::<_, ReceivedRow>("SELECT * FROM received ORDER BY rowid")
            .fetch_all(self.pool_manager.pool())
            .await?;
        debug!("Retrieved {} received messages", rows.len());

        rows.into_iter().map(ReceivedMessage::try_from).collect()
    }

    async fn count(&self, status: StatusName) -> Result<i64, StorageError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM received WHERE status_name = ?")
            .bind(status.as_str())
            .fetch_one(self.pool_manager.pool())
            .await?;

        Ok(count.0)
    }
}
