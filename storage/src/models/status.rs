//! Message lifecycle status and collection selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Lifecycle state of a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusName {
    Failed,
    Scheduled,
    Succeeded,
    Delayed,
    Queued,
}

impl StatusName {
    pub const ALL: [StatusName; 5] = [
        StatusName::Failed,
        StatusName::Scheduled,
        StatusName::Succeeded,
        StatusName::Delayed,
        StatusName::Queued,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusName::Failed => "Failed",
            StatusName::Scheduled => "Scheduled",
            StatusName::Succeeded => "Succeeded",
            StatusName::Delayed => "Delayed",
            StatusName::Queued => "Queued",
        }
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse of the stored status string.
impl FromStr for StatusName {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusName::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StorageError::InvalidRecord(format!("unknown status name: {}", s)))
    }
}

/// Selects the published or the received collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Publish,
    Subscribe,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Publish => f.write_str("publish"),
            MessageType::Subscribe => f.write_str("subscribe"),
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "publish" | "published" => Ok(MessageType::Publish),
            "subscribe" | "received" => Ok(MessageType::Subscribe),
            other => Err(format!(
                "unknown message type '{}', expected publish or received",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_name_round_trips_through_str() {
        for status in StatusName::ALL {
            assert_eq!(status.as_str().parse::<StatusName>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_name_parse_is_case_sensitive() {
        assert!("succeeded".parse::<StatusName>().is_err());
        assert!(matches!(
            "Unknown".parse::<StatusName>(),
            Err(StorageError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_message_type_accepts_aliases() {
        assert_eq!("Publish".parse::<MessageType>().unwrap(), MessageType::Publish);
        assert_eq!("received".parse::<MessageType>().unwrap(), MessageType::Subscribe);
        assert!("outbox".parse::<MessageType>().is_err());
    }
}
