//! Storage crate: published/received message records and the read capability the monitor queries.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – PublishedMessage, ReceivedMessage, StatusName, MessageType, StoredMessage
//! - [`collection`] – MessageCollection trait
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`inmemory_store`] – InMemoryCollection / InMemoryMessageStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod collection;
mod error;
mod inmemory_store;
mod message_repo;
mod models;
mod sqlite_pool;

#[cfg(test)]
mod message_repo_test;

pub use collection::MessageCollection;
pub use error::StorageError;
pub use inmemory_store::{InMemoryCollection, InMemoryMessageStore};
pub use message_repo::{MessageRepository, PublishedTable, ReceivedTable};
pub use models::{MessageType, PublishedMessage, ReceivedMessage, StatusName, StoredMessage};
pub use sqlite_pool::SqlitePoolManager;
