//! Message record models and their descriptors.

mod message_record;
mod status;

pub use message_record::{PublishedMessage, ReceivedMessage, StoredMessage};
pub use status::{MessageType, StatusName};
