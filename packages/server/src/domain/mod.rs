//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod policy;
pub mod repository;
pub mod value_object;

pub use entity::{NewMessage, Principal, StoredMessage};
pub use error::{NotifyError, RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use policy::{JoinPolicy, OpenJoinPolicy, TeamJoinPolicy};
pub use repository::{ClearNotifier, MessageRepository, RoomRegistry};
pub use value_object::{
    AuthorName, ConnectionId, MessageContent, MessageId, RoomId, Timestamp, UserId,
};
