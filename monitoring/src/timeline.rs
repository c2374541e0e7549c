//! Hourly timeline: 24 trailing hour buckets of status-matching messages.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use monitor_storage::StoredMessage;

use crate::models::{HourlyBucket, HourlyTimeline};

pub const TIMELINE_HOURS: i64 = 24;

/// Bucket key; drops minutes and seconds so stamps in the same hour collide.
const HOUR_KEY_FORMAT: &str = "%Y-%m-%d-%H";

fn hour_key(at: &DateTime<Utc>) -> String {
    at.format(HOUR_KEY_FORMAT).to_string()
}

/// `now`, `now - 1h`, ... `now - 23h`.
pub(crate) fn trailing_hours(now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    (0..TIMELINE_HOURS)
        .map(|i| now - Duration::hours(i))
        .collect()
}

/// Counts records whose status string equals `status_name` exactly, grouped by
/// the hour they were added, over the 24 hours ending at `now`.
pub(crate) fn build_timeline<R: StoredMessage>(
    records: &[R],
    status_name: &str,
    now: DateTime<Utc>,
) -> HourlyTimeline {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for record in records
        .iter()
        .filter(|r| r.status_name().as_str() == status_name)
    {
        *counts.entry(hour_key(&record.added())).or_insert(0) += 1;
    }

    let buckets = trailing_hours(now)
        .into_iter()
        .map(|at| HourlyBucket {
            count: counts.get(&hour_key(&at)).copied().unwrap_or(0),
            at,
        })
        .collect();

    HourlyTimeline::new(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use monitor_storage::{PublishedMessage, StatusName};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap()
    }

    fn published(id: &str, status: StatusName, added: DateTime<Utc>) -> PublishedMessage {
        PublishedMessage::new(id, "orders.created", "{}", status).with_added(added)
    }

    #[test]
    fn test_trailing_hours_newest_first() {
        let now = at(15, 42);
        let hours = trailing_hours(now);

        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0], now);
        assert_eq!(hours[1], at(14, 42));
        assert_eq!(hours[23], Utc.with_ymd_and_hms(2024, 3, 9, 16, 42, 0).unwrap());
    }

    #[test]
    fn test_empty_records_give_24_zero_buckets() {
        let timeline = build_timeline::<PublishedMessage>(&[], "Succeeded", at(15, 0));

        assert_eq!(timeline.len(), 24);
        assert!(timeline.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_counts_group_by_hour_ignoring_minutes() {
        let now = at(15, 10);
        let records = vec![
            published("1", StatusName::Failed, at(15, 5)),
            published("2", StatusName::Failed, at(14, 59)),
            published("3", StatusName::Failed, at(14, 0)),
            published("4", StatusName::Succeeded, at(14, 30)),
            // Before the first bucket's hour, outside the window.
            published(
                "5",
                StatusName::Failed,
                Utc.with_ymd_and_hms(2024, 3, 9, 15, 59, 0).unwrap(),
            ),
        ];

        let timeline = build_timeline(&records, "Failed", now);

        assert_eq!(timeline.get(&now), Some(1));
        assert_eq!(timeline.get(&at(14, 10)), Some(2));
        assert_eq!(timeline.total(), 3);
    }

    #[test]
    fn test_earliest_hour_counts_whole_hour() {
        let now = at(15, 30);
        let records = vec![published(
            "1",
            StatusName::Succeeded,
            Utc.with_ymd_and_hms(2024, 3, 9, 16, 0, 0).unwrap(),
        )];

        let timeline = build_timeline(&records, "Succeeded", now);

        assert_eq!(timeline.buckets()[23].count, 1);
    }

    #[test]
    fn test_status_match_is_case_sensitive() {
        let now = at(15, 0);
        let records = vec![published("1", StatusName::Succeeded, now)];

        assert_eq!(build_timeline(&records, "succeeded", now).total(), 0);
        assert_eq!(build_timeline(&records, "Succeeded", now).total(), 1);
    }
}
