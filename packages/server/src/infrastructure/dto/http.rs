//! HTTP API request/response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/broadcast`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub room: Option<String>,
    pub message: Option<String>,
    pub user: Option<String>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Body of `POST /api/chat/clear`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearRequest {
    pub room: Option<String>,
}

/// `{"ok": true}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// `{"ok": false, "error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Room diagnostics for `GET /api/rooms/{room}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStatsDto {
    pub room: String,
    pub connections: usize,
}
