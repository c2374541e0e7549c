//! Values the monitor builds: statistics, hourly timelines, search queries and pages.

use chrono::{DateTime, Utc};
use monitor_storage::{MessageType, StoredMessage};
use serde::{Deserialize, Serialize};

/// Placeholder reported as `version`; the store keeps no schema version.
pub const UNKNOWN_VERSION: &str = "N/A";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub published_succeeded: i64,
    pub received_succeeded: i64,
    pub published_failed: i64,
    pub received_failed: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub at: DateTime<Utc>,
    pub count: i64,
}

/// Counts for the 24 trailing hours, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyTimeline {
    buckets: Vec<HourlyBucket>,
}

impl HourlyTimeline {
    pub(crate) fn new(buckets: Vec<HourlyBucket>) -> Self {
        Self { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HourlyBucket> {
        self.buckets.iter()
    }

    pub fn buckets(&self) -> &[HourlyBucket] {
        &self.buckets
    }

    /// Count recorded under the exact bucket stamp `at`.
    pub fn get(&self, at: &DateTime<Utc>) -> Option<i64> {
        self.buckets.iter().find(|b| &b.at == at).map(|b| b.count)
    }

    pub fn total(&self) -> i64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

impl IntoIterator for HourlyTimeline {
    type Item = HourlyBucket;
    type IntoIter = std::vec::IntoIter<HourlyBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

/// Search request from the monitoring façade.
///
/// Empty filter strings count as absent. `group` only applies to received messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageQuery {
    pub message_type: MessageType,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    /// Zero-based page index.
    #[serde(default)]
    pub current_page: i64,
    pub page_size: i64,
}

impl MessageQuery {
    /// First page of `message_type` with no filters.
    pub fn new(message_type: MessageType, page_size: i64) -> Self {
        Self {
            message_type,
            status_name: None,
            name: None,
            content: None,
            group: None,
            current_page: 0,
            page_size,
        }
    }

    pub fn status_name(mut self, status_name: impl Into<String>) -> Self {
        self.status_name = Some(status_name.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn page(mut self, current_page: i64) -> Self {
        self.current_page = current_page;
        self
    }
}

/// Summary of one message as shown by the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub name: String,
    pub content: String,
    pub added: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub retries: i32,
    pub status_name: String,
}

impl MessageView {
    pub fn from_record<R: StoredMessage>(record: &R) -> Self {
        Self {
            id: record.id().to_string(),
            version: UNKNOWN_VERSION.to_string(),
            group: record.group().map(str::to_string),
            name: record.name().to_string(),
            content: record.content().to_string(),
            added: record.added(),
            expires_at: record.expires_at(),
            retries: record.retries(),
            status_name: record.status_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedQueryResult<T> {
    pub items: Vec<T>,
    pub page_index: i64,
    pub page_size: i64,
    /// Size of the filtered set before paging.
    pub totals: i64,
}
