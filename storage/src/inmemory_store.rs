//! # In-Memory Message Store
//!
//! In-memory implementation of [`MessageCollection`], for tests and for
//! embedding the monitor without a database.
//!
//! Records are kept in insertion order. The store uses `Arc<RwLock<>>`, so
//! clones share the same records and concurrent readers never block each other.
//!
//! ## Example
//!
//! ```rust
//! use monitor_storage::{InMemoryMessageStore, MessageCollection, PublishedMessage, StatusName};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), monitor_storage::StorageError> {
//!     let store = InMemoryMessageStore::new();
//!     store
//!         .published
//!         .insert(PublishedMessage::new("1", "orders.created", "{}", StatusName::Succeeded))
//!         .await;
//!
//!     assert_eq!(store.published.count(StatusName::Succeeded).await?, 1);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::collection::MessageCollection;
use crate::error::StorageError;
use crate::models::{PublishedMessage, ReceivedMessage, StatusName, StoredMessage};

/// One in-memory collection of records.
#[derive(Debug, Clone)]
pub struct InMemoryCollection<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R: StoredMessage> InMemoryCollection<R> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Appends a record. Ids are not checked for uniqueness.
    pub async fn insert(&self, record: R) {
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

impl<R: StoredMessage> Default for InMemoryCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: StoredMessage> MessageCollection<R> for InMemoryCollection<R> {
    async fn find_one(&self, id: &str) -> Result<Option<R>, StorageError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<R>, StorageError> {
        Ok(self.records.read().await.clone())
    }

    async fn count(&self, status: StatusName) -> Result<i64, StorageError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.status_name() == status).count() as i64)
    }
}

/// Published and received collections side by side.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    pub published: InMemoryCollection<PublishedMessage>,
    pub received: InMemoryCollection<ReceivedMessage>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}
