//! Unit tests for MessageRepository.
//!
//! Covers schema creation on an in-memory database, find_one, count and decoding.

use crate::collection::MessageCollection;
use crate::error::StorageError;
use crate::message_repo::MessageRepository;
use crate::models::{PublishedMessage, ReceivedMessage, StatusName};

#[tokio::test]
async fn test_find_one_existing_published() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let message =
        PublishedMessage::new("1001", "orders.created", "{\"id\":1}", StatusName::Succeeded);
    repo.save_published(&message)
        .await
        .expect("Failed to save message");

    let retrieved = repo
        .published()
        .find_one("1001")
        .await
        .expect("Failed to get message");

    let retrieved = retrieved.expect("message should exist");
    assert_eq!(retrieved.id, "1001");
    assert_eq!(retrieved.name, "orders.created");
    assert_eq!(retrieved.status_name, StatusName::Succeeded);
    assert_eq!(retrieved.added, message.added);
}

#[tokio::test]
async fn test_find_one_not_found() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let retrieved = repo
        .received()
        .find_one("non-existent-id")
        .await
        .expect("Failed to query");

    assert!(retrieved.is_none());
}

#[tokio::test]
async fn test_count_by_status() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    for (i, status) in [StatusName::Failed, StatusName::Failed, StatusName::Scheduled]
        .into_iter()
        .enumerate()
    {
        let message =
            ReceivedMessage::new(i.to_string(), "orders.created", "billing", "{}", status);
        repo.save_received(&message)
            .await
            .expect("Failed to save message");
    }

    let received = repo.received();
    assert_eq!(received.count(StatusName::Failed).await.unwrap(), 2);
    assert_eq!(received.count(StatusName::Scheduled).await.unwrap(), 1);
    assert_eq!(received.count(StatusName::Succeeded).await.unwrap(), 0);
    assert_eq!(repo.published().count(StatusName::Failed).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_stored_status_is_invalid_record() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    sqlx::query(
        "INSERT INTO published (id, name, content, added, retries, status_name) \
         VALUES ('1', 'n', 'c', '2024-01-01T00:00:00Z', 0, 'Lost')",
    )
    .execute(repo.pool_manager().pool())
    .await
    .expect("Failed to insert raw row");

    let result = repo.published().find_all().await;
    assert!(matches!(result, Err(StorageError::InvalidRecord(_))));
}
