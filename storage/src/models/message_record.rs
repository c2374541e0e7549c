//! Message record models for persistence.
//!
//! Map to the `published` and `received` tables and are read by the monitor
//! through [`StoredMessage`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::StatusName;

/// Field accessors shared by both record kinds, so one routine can aggregate
/// or search either collection.
pub trait StoredMessage: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn content(&self) -> &str;
    fn added(&self) -> DateTime<Utc>;
    fn expires_at(&self) -> Option<DateTime<Utc>>;
    fn retries(&self) -> i32;
    fn status_name(&self) -> StatusName;

    /// Consumer group; only received messages carry one.
    fn group(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedMessage {
    pub id: String,
    pub name: String,
    pub content: String,
    pub added: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub retries: i32,
    pub status_name: StatusName,
}

impl PublishedMessage {
    /// Creates a record added now with no expiry and zero retries.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
        status_name: StatusName,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            added: Utc::now(),
            expires_at: None,
            retries: 0,
            status_name,
        }
    }

    pub fn with_added(mut self, added: DateTime<Utc>) -> Self {
        self.added = added;
        self
    }
}

impl StoredMessage for PublishedMessage {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn added(&self) -> DateTime<Utc> {
        self.added
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn retries(&self) -> i32 {
        self.retries
    }

    fn status_name(&self) -> StatusName {
        self.status_name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub id: String,
    pub name: String,
    pub group: String,
    pub content: String,
    pub added: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub retries: i32,
    pub status_name: StatusName,
}

impl ReceivedMessage {
    /// Creates a record added now with no expiry and zero retries.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        group: impl Into<String>,
        content: impl Into<String>,
        status_name: StatusName,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: group.into(),
            content: content.into(),
            added: Utc::now(),
            expires_at: None,
            retries: 0,
            status_name,
        }
    }

    pub fn with_added(mut self, added: DateTime<Utc>) -> Self {
        self.added = added;
        self
    }
}

impl StoredMessage for ReceivedMessage {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn added(&self) -> DateTime<Utc> {
        self.added
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn retries(&self) -> i32 {
        self.retries
    }

    fn status_name(&self) -> StatusName {
        self.status_name
    }

    fn group(&self) -> Option<&str> {
        Some(&self.group)
    }
}
