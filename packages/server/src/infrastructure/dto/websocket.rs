//! WebSocket message DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::domain::StoredMessage;

/// Events a client may send over the socket.
///
/// The set is closed: an unknown `type` fails to deserialize and is
/// rejected before it reaches the use cases. Fields are optional here so
/// that missing values are reported by the command validation instead of
/// a generic parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientEvent {
    Join {
        room: Option<String>,
    },
    Message {
        room: Option<String>,
        message: Option<String>,
        user: Option<String>,
        #[serde(rename = "userId", default)]
        user_id: Option<String>,
    },
}

/// A stored message as delivered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: String,
    pub room: String,
    pub message: String,
    pub user: String,
    pub user_id: Option<String>,
    /// ISO 8601, exactly the persisted server timestamp
    pub created_at: String,
}

impl From<&StoredMessage> for MessagePayload {
    fn from(message: &StoredMessage) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            room: message.room.as_str().to_string(),
            message: message.content.as_str().to_string(),
            user: message.author.as_str().to_string(),
            user_id: message.author_id.as_ref().map(|u| u.as_str().to_string()),
            created_at: message.created_at.to_iso8601(),
        }
    }
}

/// Events the relay pushes to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    #[serde(rename = "message")]
    Message(MessagePayload),
    #[serde(rename = "chat:cleared")]
    ChatCleared { room: String },
    #[serde(rename = "joined")]
    Joined { room: String },
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerEvent {
    /// Serialize to the JSON text frame sent over the socket.
    pub fn to_json(&self) -> String {
        // Serializing these plain structs cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
