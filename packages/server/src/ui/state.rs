//! Relay state shared by every handler.

use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::{JoinPolicy, MessageRepository, OpenJoinPolicy, Principal, RoomRegistry},
    infrastructure::{InMemoryMessageRepository, InMemoryRoomRegistry},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    /// Team of the connecting principal, set by a trusted front proxy
    pub team_id: Option<String>,
}

impl ConnectQuery {
    pub fn principal(self) -> Principal {
        self.team_id
            .filter(|t| !t.is_empty())
            .map(Principal::of_team)
            .unwrap_or_default()
    }
}

/// Shared application state
///
/// Constructed once per relay instance and handed to the router; the
/// registry inside is owned by this instance for its whole lifetime.
pub struct AppState {
    /// Message store（データアクセス層の抽象化）
    pub repository: Arc<dyn MessageRepository>,
    /// Live room membership
    pub registry: Arc<dyn RoomRegistry>,
    /// Room admission policy
    pub join_policy: Arc<dyn JoinPolicy>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        registry: Arc<dyn RoomRegistry>,
        join_policy: Arc<dyn JoinPolicy>,
    ) -> Self {
        Self {
            repository,
            registry,
            join_policy,
        }
    }

    /// Fully in-memory state with an open join policy.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(InMemoryRoomRegistry::new()),
            Arc::new(OpenJoinPolicy),
        )
    }
}
