//! Filtered paged search.
//!
//! [`RecordFilter`] collects conjunctive predicates and runs nothing until
//! [`RecordFilter::apply`]; the page is then cut from the filtered, ordered
//! set so `totals` never depends on the slice.

use monitor_storage::StoredMessage;

use crate::error::{MonitoringError, Result};
use crate::models::{MessageQuery, MessageView, PagedQueryResult};

type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// Treats `None` and `""` alike.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Conjunction of record predicates, evaluated lazily.
pub struct RecordFilter<R> {
    predicates: Vec<Predicate<R>>,
}

impl<R: StoredMessage> RecordFilter<R> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    fn push(mut self, predicate: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Case-insensitive match on the status string.
    pub fn with_status(self, status_name: Option<&str>) -> Self {
        match present(status_name) {
            Some(wanted) => {
                let wanted = wanted.to_lowercase();
                self.push(move |r| r.status_name().as_str().to_lowercase() == wanted)
            }
            None => self,
        }
    }

    /// Case-insensitive match on the message name.
    pub fn with_name(self, name: Option<&str>) -> Self {
        match present(name) {
            Some(wanted) => {
                let wanted = wanted.to_lowercase();
                self.push(move |r| r.name().to_lowercase() == wanted)
            }
            None => self,
        }
    }

    /// Case-insensitive match on the consumer group. Records without a group
    /// (published messages) are not constrained.
    pub fn with_group(self, group: Option<&str>) -> Self {
        match present(group) {
            Some(wanted) => {
                let wanted = wanted.to_lowercase();
                self.push(move |r| r.group().map_or(true, |g| g.to_lowercase() == wanted))
            }
            None => self,
        }
    }

    /// Case-sensitive substring match on the content.
    pub fn with_content(self, content: Option<&str>) -> Self {
        match present(content) {
            Some(wanted) => {
                let wanted = wanted.to_string();
                self.push(move |r| r.content().contains(wanted.as_str()))
            }
            None => self,
        }
    }

    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p(record))
    }

    /// Keeps matching records, ordered by `(added, id)`.
    pub fn apply(&self, records: Vec<R>) -> Vec<R> {
        let mut matched: Vec<R> = records.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| a.added().cmp(&b.added()).then_with(|| a.id().cmp(b.id())));
        matched
    }

    pub fn from_query(query: &MessageQuery) -> Self {
        Self::new()
            .with_status(query.status_name.as_deref())
            .with_name(query.name.as_deref())
            .with_group(query.group.as_deref())
            .with_content(query.content.as_deref())
    }
}

impl<R: StoredMessage> Default for RecordFilter<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Offset and size of the requested page. Negative inputs are rejected.
pub(crate) fn page_window(current_page: i64, page_size: i64) -> Result<(usize, usize)> {
    if current_page < 0 {
        return Err(MonitoringError::InvalidQuery(format!(
            "page index must not be negative, got {}",
            current_page
        )));
    }
    if page_size < 0 {
        return Err(MonitoringError::InvalidQuery(format!(
            "page size must not be negative, got {}",
            page_size
        )));
    }

    let offset = current_page.checked_mul(page_size).ok_or_else(|| {
        MonitoringError::InvalidQuery(format!(
            "page {} of size {} is out of range",
            current_page, page_size
        ))
    })?;
    let to_usize = |v: i64| {
        usize::try_from(v)
            .map_err(|_| MonitoringError::InvalidQuery(format!("{} is out of range", v)))
    };

    Ok((to_usize(offset)?, to_usize(page_size)?))
}

/// Filters, orders, projects and pages `records` per `query`, cutting the
/// `(offset, size)` window that [`page_window`] computed for it.
pub(crate) fn search_records<R: StoredMessage>(
    records: Vec<R>,
    query: &MessageQuery,
    (offset, size): (usize, usize),
) -> PagedQueryResult<MessageView> {
    let matched = RecordFilter::from_query(query).apply(records);
    let totals = matched.len() as i64;
    let items = matched
        .iter()
        .skip(offset)
        .take(size)
        .map(MessageView::from_record)
        .collect();

    PagedQueryResult {
        items,
        page_index: query.current_page,
        page_size: query.page_size,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use monitor_storage::{MessageType, PublishedMessage, ReceivedMessage, StatusName};

    fn received(
        id: &str,
        name: &str,
        group: &str,
        content: &str,
        status: StatusName,
    ) -> ReceivedMessage {
        ReceivedMessage::new(id, name, group, content, status)
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(0, 10).unwrap(), (0, 10));
        assert_eq!(page_window(3, 20).unwrap(), (60, 20));
        assert_eq!(page_window(5, 0).unwrap(), (0, 0));
    }

    #[test]
    fn test_page_window_rejects_negative_and_overflow() {
        assert!(matches!(page_window(-1, 10), Err(MonitoringError::InvalidQuery(_))));
        assert!(matches!(page_window(0, -5), Err(MonitoringError::InvalidQuery(_))));
        assert!(matches!(page_window(i64::MAX, 2), Err(MonitoringError::InvalidQuery(_))));
    }

    #[test]
    fn test_empty_filter_values_are_ignored() {
        let records = vec![received("1", "a", "g", "x", StatusName::Failed)];
        let filter = RecordFilter::new()
            .with_status(Some(""))
            .with_name(Some(""))
            .with_group(None)
            .with_content(Some(""));

        assert_eq!(filter.apply(records).len(), 1);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let records = vec![
            received("1", "orders.paid", "billing", "{\"sku\":\"A\"}", StatusName::Failed),
            received("2", "orders.paid", "billing", "{\"sku\":\"B\"}", StatusName::Failed),
            received("3", "orders.paid", "shipping", "{\"sku\":\"A\"}", StatusName::Failed),
            received("4", "orders.paid", "billing", "{\"sku\":\"A\"}", StatusName::Succeeded),
        ];
        let filter = RecordFilter::new()
            .with_status(Some("FAILED"))
            .with_group(Some("Billing"))
            .with_content(Some("\"A\""));

        let ids: Vec<String> = filter.apply(records).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1".to_string()]);
    }

    #[test]
    fn test_content_is_case_sensitive() {
        let records = vec![received("1", "n", "g", "FOO BAR", StatusName::Succeeded)];

        assert!(RecordFilter::new()
            .with_content(Some("bar"))
            .apply(records.clone())
            .is_empty());
        assert_eq!(
            RecordFilter::new()
                .with_content(Some("BAR"))
                .apply(records)
                .len(),
            1
        );
    }

    #[test]
    fn test_group_does_not_constrain_published() {
        let records = vec![PublishedMessage::new("1", "n", "c", StatusName::Succeeded)];

        assert_eq!(
            RecordFilter::new()
                .with_group(Some("g1"))
                .apply(records)
                .len(),
            1
        );
    }

    #[test]
    fn test_apply_orders_by_added_then_id() {
        let now = Utc::now();
        let records = vec![
            received("b", "n", "g", "c", StatusName::Failed).with_added(now),
            received("c", "n", "g", "c", StatusName::Failed)
                .with_added(now - Duration::hours(1)),
            received("a", "n", "g", "c", StatusName::Failed).with_added(now),
        ];

        let ids: Vec<String> = RecordFilter::new()
            .apply(records)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_search_records_slices_after_counting() {
        let now = Utc::now();
        let records: Vec<PublishedMessage> = (0..7)
            .map(|i| {
                PublishedMessage::new(i.to_string(), "n", "c", StatusName::Succeeded)
                    .with_added(now + Duration::seconds(i))
            })
            .collect();
        let query = MessageQuery::new(MessageType::Publish, 3).page(2);

        let window = page_window(query.current_page, query.page_size).unwrap();
        assert_eq!(window, (6, 3));

        let page = search_records(records, &query, window);

        assert_eq!(page.totals, 7);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "6");
        assert_eq!(page.items[0].version, "N/A");
        assert_eq!(page.items[0].group, None);
    }
}
