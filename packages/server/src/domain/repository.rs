//! Repository traits
//!
//! ドメイン層が定義するデータアクセスの抽象。
//! 実装は infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    ConnectionId, NewMessage, RoomId, StoredMessage,
    error::{NotifyError, RepositoryError},
};

/// Durable, append-only message log keyed by room.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message, assigning its id and (when absent) its timestamp.
    async fn append(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError>;

    /// All messages of a room, oldest first; ties keep insertion order.
    async fn list_by_room(&self, room: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError>;

    /// Remove every message of a room and report how many were removed.
    async fn delete_by_room(&self, room: &RoomId) -> Result<u64, RepositoryError>;
}

/// Live room membership of connection handles.
///
/// Pure in-memory state. Operations on unknown rooms or handles are no-ops.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Attach the outbound channel of a freshly accepted handle.
    async fn register(&self, handle: ConnectionId, sender: UnboundedSender<String>);

    /// Add a handle to a room. Joining twice has no additional effect.
    async fn join(&self, handle: &ConnectionId, room: &RoomId);

    /// Remove a handle from one room.
    async fn leave(&self, handle: &ConnectionId, room: &RoomId);

    /// Remove a handle from every room and drop its outbound channel.
    async fn leave_all(&self, handle: &ConnectionId);

    /// Deliver `payload` to every handle in `room`; returns how many accepted it.
    async fn broadcast(&self, room: &RoomId, payload: String) -> usize;

    /// Deliver `payload` to one handle only; false when it is gone.
    async fn send_to(&self, handle: &ConnectionId, payload: String) -> bool;

    /// Current membership count of a room.
    async fn room_size(&self, room: &RoomId) -> usize;
}

/// Tells connected clients that a room's history was wiped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClearNotifier: Send + Sync {
    async fn notify_cleared(&self, room: &RoomId) -> Result<(), NotifyError>;
}
