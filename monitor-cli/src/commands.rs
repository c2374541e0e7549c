//! Subcommand handlers. Each returns the JSON value the binary prints.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use monitor_storage::{
    MessageRepository, MessageType, PublishedMessage, ReceivedMessage, StatusName,
};
use monitoring::{MessageQuery, MonitoringApi};
use serde_json::{json, Value};
use tracing::info;

use crate::cli::Commands;
use crate::config::MonitorConfig;

const SEED_NAMES: [&str; 3] = ["orders.created", "orders.paid", "users.registered"];
const SEED_GROUPS: [&str; 2] = ["billing", "shipping"];

pub async fn execute(
    command: Commands,
    repo: &MessageRepository,
    config: &MonitorConfig,
) -> Result<Value> {
    let api = MonitoringApi::from_repository(repo);

    match command {
        Commands::Stats => {
            let stats = api.get_statistics().await.context("Query statistics")?;
            Ok(serde_json::to_value(stats)?)
        }
        Commands::Timeline {
            message_type,
            status,
        } => {
            let timeline = api
                .hourly_timeline(message_type, &status)
                .await
                .context("Build hourly timeline")?;
            Ok(serde_json::to_value(timeline.buckets())?)
        }
        Commands::Search {
            message_type,
            status,
            name,
            content,
            group,
            page,
            page_size,
        } => {
            let query = MessageQuery {
                message_type,
                status_name: status,
                name,
                content,
                group,
                current_page: page,
                page_size: page_size.unwrap_or(config.default_page_size),
            };
            let result = api.search(&query).await.context("Search messages")?;
            Ok(serde_json::to_value(result)?)
        }
        Commands::Get { message_type, id } => {
            let found = match message_type {
                MessageType::Publish => api
                    .get_published_message(&id)
                    .await?
                    .map(serde_json::to_value)
                    .transpose()?,
                MessageType::Subscribe => api
                    .get_received_message(&id)
                    .await?
                    .map(serde_json::to_value)
                    .transpose()?,
            };
            Ok(found.unwrap_or(Value::Null))
        }
        Commands::Seed { count } => seed(repo, count).await,
    }
}

/// Gap between consecutive demo messages so that `count` of them, going back
/// from now, all land inside the last 24 hours.
fn seed_spacing(count: usize) -> Duration {
    let day_ms = Duration::hours(24).num_milliseconds();
    Duration::milliseconds((day_ms / count.max(1) as i64).max(1))
}

/// Inserts `count` published and `count` received demo messages spread evenly
/// back from now over the last 24 hours, cycling through statuses.
async fn seed(repo: &MessageRepository, count: usize) -> Result<Value> {
    let now = Utc::now();
    let batch = now.timestamp_millis();
    let spacing = seed_spacing(count);

    for i in 0..count {
        let status = StatusName::ALL[i % StatusName::ALL.len()];
        let name = SEED_NAMES[i % SEED_NAMES.len()];
        let added = now - spacing * i as i32;

        let published = PublishedMessage::new(
            format!("{}{:04}", batch, i),
            name,
            format!("{{\"seq\":{}}}", i),
            status,
        )
        .with_added(added);
        repo.save_published(&published)
            .await
            .context("Insert published demo message")?;

        let received = ReceivedMessage::new(
            format!("{}{:04}", batch, i),
            name,
            SEED_GROUPS[i % SEED_GROUPS.len()],
            format!("{{\"seq\":{}}}", i),
            status,
        )
        .with_added(added);
        repo.save_received(&received)
            .await
            .context("Insert received demo message")?;
    }

    info!("Seeded {} published and {} received messages", count, count);
    Ok(json!({ "published": count, "received": count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_spacing_keeps_every_message_within_a_day() {
        for count in [1, 10, 1440, 2000, 100_000] {
            let spacing = seed_spacing(count);
            let oldest = spacing * (count as i32 - 1);

            assert!(spacing > Duration::zero(), "count {}", count);
            assert!(oldest < Duration::hours(24), "count {}", count);
        }
    }

    #[test]
    fn test_seed_spacing_below_a_minute_for_large_batches() {
        assert_eq!(seed_spacing(2000), Duration::milliseconds(43_200));
        assert_eq!(seed_spacing(0), Duration::hours(24));
    }
}
