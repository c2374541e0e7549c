//! # monitoring
//!
//! Read-only monitoring queries over a message-delivery store: status totals
//! ([`MonitoringApi::get_statistics`]), 24-hour timelines
//! ([`MonitoringApi::hourly_succeeded_jobs`], [`MonitoringApi::hourly_failed_jobs`])
//! and filtered paged search ([`MonitoringApi::search`]).
//!
//! The store is injected as [`monitor_storage::MessageCollection`] handles; the
//! engine keeps no state of its own and never writes.

mod error;
mod models;
mod monitoring_api;
mod search;
mod timeline;

pub use error::{MonitoringError, Result};
pub use models::{
    HourlyBucket, HourlyTimeline, MessageQuery, MessageView, PagedQueryResult, StatisticsSnapshot,
    UNKNOWN_VERSION,
};
pub use monitoring_api::MonitoringApi;
pub use search::RecordFilter;
pub use timeline::TIMELINE_HOURS;
