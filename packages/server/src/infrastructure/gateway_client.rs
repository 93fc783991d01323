//! HTTP client for the relay's broadcast gateway.
//!
//! Used by processes that are not connection-aware (the surrounding web
//! application, the operator CLI) to hand messages and clear-signals to a
//! running relay.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::{
    domain::{ClearNotifier, NotifyError, RoomId},
    infrastructure::dto::http::{BroadcastRequest, ClearRequest},
};

/// Errors returned by [`HttpGatewayClient`].
#[derive(Debug, Error)]
pub enum GatewayClientError {
    /// The relay could not be reached or the response could not be read.
    #[error("gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("gateway rejected request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Client for `POST /api/chat/broadcast` and `POST /api/chat/clear`.
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the relay to persist and fan out a message.
    pub async fn broadcast(
        &self,
        room: &str,
        message: &str,
        user: &str,
        user_id: Option<&str>,
    ) -> Result<(), GatewayClientError> {
        let body = BroadcastRequest {
            room: Some(room.to_string()),
            message: Some(message.to_string()),
            user: Some(user.to_string()),
            user_id: user_id.map(str::to_string),
        };
        self.post("/api/chat/broadcast", &body).await
    }

    /// Ask the relay to tell a room's clients their history was wiped.
    pub async fn clear(&self, room: &str) -> Result<(), GatewayClientError> {
        let body = ClearRequest {
            room: Some(room.to_string()),
        };
        self.post("/api/chat/clear", &body).await
    }

    async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), GatewayClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayClientError::Rejected { status, body })
    }
}

#[async_trait]
impl ClearNotifier for HttpGatewayClient {
    async fn notify_cleared(&self, room: &RoomId) -> Result<(), NotifyError> {
        self.clear(room.as_str())
            .await
            .map_err(|e| NotifyError(e.to_string()))
    }
}
