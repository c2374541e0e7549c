//! Read capability over one message collection.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{StatusName, StoredMessage};

/// Read-only handle to a published or received collection.
///
/// Implementations own their consistency; callers must not assume two calls
/// observe the same state.
#[async_trait]
pub trait MessageCollection<R: StoredMessage>: Send + Sync {
    /// Exact id match; `Ok(None)` when absent.
    async fn find_one(&self, id: &str) -> Result<Option<R>, StorageError>;

    /// Every record, in insertion order.
    async fn find_all(&self) -> Result<Vec<R>, StorageError>;

    /// Number of records whose status equals `status`.
    async fn count(&self, status: StatusName) -> Result<i64, StorageError>;
}
