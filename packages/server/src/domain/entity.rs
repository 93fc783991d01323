//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{AuthorName, MessageContent, MessageId, RoomId, Timestamp, UserId};

/// A message about to be persisted.
///
/// `created_at` is left empty by the relay so the store assigns server time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub room: RoomId,
    pub author: AuthorName,
    pub author_id: Option<UserId>,
    pub content: MessageContent,
    pub created_at: Option<Timestamp>,
}

impl NewMessage {
    /// Create a message without a timestamp
    pub fn new(
        room: RoomId,
        author: AuthorName,
        author_id: Option<UserId>,
        content: MessageContent,
    ) -> Self {
        Self {
            room,
            author,
            author_id,
            content,
            created_at: None,
        }
    }

    /// Pin the creation time instead of letting the store assign it
    pub fn at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// A persisted, immutable chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Store-assigned identifier
    pub id: MessageId,
    /// Room the message belongs to
    pub room: RoomId,
    /// Author display name at the time of sending
    pub author: AuthorName,
    /// Author id, when the sending path supplied one
    pub author_id: Option<UserId>,
    /// Message body
    pub content: MessageContent,
    /// Server-assigned creation time
    pub created_at: Timestamp,
}

impl StoredMessage {
    /// Materialise a stored record from a pending message
    pub fn from_new(id: MessageId, message: NewMessage, created_at: Timestamp) -> Self {
        Self {
            id,
            room: message.room,
            author: message.author,
            author_id: message.author_id,
            content: message.content,
            created_at,
        }
    }
}

/// Who is behind a connection, as far as the relay knows.
///
/// `team_id` comes from the connect request and is only trustworthy when a
/// front proxy derived it from a verified session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    pub team_id: Option<String>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn of_team(team_id: impl Into<String>) -> Self {
        Self {
            team_id: Some(team_id.into()),
        }
    }
}
