//! Monitoring API: the query surface the monitoring façade calls.
//!
//! Holds read-only handles to the published and received collections and
//! nothing else; every call goes straight to the store.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use monitor_storage::{
    InMemoryMessageStore, MessageCollection, MessageRepository, MessageType, PublishedMessage,
    ReceivedMessage, StatusName, StoredMessage,
};

use crate::error::Result;
use crate::models::{
    HourlyTimeline, MessageQuery, MessageView, PagedQueryResult, StatisticsSnapshot,
};
use crate::search::{page_window, search_records};
use crate::timeline::build_timeline;

#[derive(Clone)]
pub struct MonitoringApi {
    published: Arc<dyn MessageCollection<PublishedMessage>>,
    received: Arc<dyn MessageCollection<ReceivedMessage>>,
}

impl MonitoringApi {
    pub fn new(
        published: Arc<dyn MessageCollection<PublishedMessage>>,
        received: Arc<dyn MessageCollection<ReceivedMessage>>,
    ) -> Self {
        Self {
            published,
            received,
        }
    }

    pub fn from_repository(repo: &MessageRepository) -> Self {
        Self::new(Arc::new(repo.published()), Arc::new(repo.received()))
    }

    pub fn from_memory(store: &InMemoryMessageStore) -> Self {
        Self::new(
            Arc::new(store.published.clone()),
            Arc::new(store.received.clone()),
        )
    }

    /// Looks up a published message by id; numeric ids are compared by their decimal form.
    pub async fn get_published_message(
        &self,
        id: impl Display,
    ) -> Result<Option<PublishedMessage>> {
        Ok(self.published.find_one(&id.to_string()).await?)
    }

    pub async fn get_received_message(&self, id: impl Display) -> Result<Option<ReceivedMessage>> {
        Ok(self.received.find_one(&id.to_string()).await?)
    }

    /// Four independent counts; under concurrent writes they may reflect
    /// slightly different moments.
    pub async fn get_statistics(&self) -> Result<StatisticsSnapshot> {
        Ok(StatisticsSnapshot {
            published_succeeded: self.published.count(StatusName::Succeeded).await?,
            received_succeeded: self.received.count(StatusName::Succeeded).await?,
            published_failed: self.published.count(StatusName::Failed).await?,
            received_failed: self.received.count(StatusName::Failed).await?,
        })
    }

    pub async fn published_failed_count(&self) -> Result<i64> {
        Ok(self.published.count(StatusName::Failed).await?)
    }

    pub async fn published_succeeded_count(&self) -> Result<i64> {
        Ok(self.published.count(StatusName::Succeeded).await?)
    }

    pub async fn received_failed_count(&self) -> Result<i64> {
        Ok(self.received.count(StatusName::Failed).await?)
    }

    pub async fn received_succeeded_count(&self) -> Result<i64> {
        Ok(self.received.count(StatusName::Succeeded).await?)
    }

    pub async fn hourly_failed_jobs(&self, message_type: MessageType) -> Result<HourlyTimeline> {
        self.hourly_timeline(message_type, StatusName::Failed.as_str())
            .await
    }

    pub async fn hourly_succeeded_jobs(&self, message_type: MessageType) -> Result<HourlyTimeline> {
        self.hourly_timeline(message_type, StatusName::Succeeded.as_str())
            .await
    }

    /// 24 trailing hourly counts of `message_type` messages whose status string
    /// is exactly `status_name`, ending now.
    pub async fn hourly_timeline(
        &self,
        message_type: MessageType,
        status_name: &str,
    ) -> Result<HourlyTimeline> {
        self.hourly_timeline_at(message_type, status_name, Utc::now())
            .await
    }

    /// Same as [`Self::hourly_timeline`], ending at `now`.
    pub async fn hourly_timeline_at(
        &self,
        message_type: MessageType,
        status_name: &str,
        now: DateTime<Utc>,
    ) -> Result<HourlyTimeline> {
        Ok(match message_type {
            MessageType::Publish => {
                build_timeline(&self.published.find_all().await?, status_name, now)
            }
            MessageType::Subscribe => {
                build_timeline(&self.received.find_all().await?, status_name, now)
            }
        })
    }

    pub async fn search(&self, query: &MessageQuery) -> Result<PagedQueryResult<MessageView>> {
        match query.message_type {
            MessageType::Publish => search_in(self.published.as_ref(), query).await,
            MessageType::Subscribe => search_in(self.received.as_ref(), query).await,
        }
    }
}

async fn search_in<R: StoredMessage>(
    collection: &dyn MessageCollection<R>,
    query: &MessageQuery,
) -> Result<PagedQueryResult<MessageView>> {
    // Reject bad paging before touching the store.
    let window = page_window(query.current_page, query.page_size)?;
    Ok(search_records(collection.find_all().await?, query, window))
}
