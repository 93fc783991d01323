//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// AuthorName validation error
    #[error("AuthorName cannot be empty")]
    AuthorNameEmpty,
}

/// Errors raised by the message store.
///
/// Every variant is fatal for the operation that hit it: a message that
/// could not be persisted is never broadcast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("message store unavailable: {0}")]
    Unavailable(String),

    /// A statement against the store failed.
    #[error("message store query failed: {0}")]
    Query(String),
}

/// A clear-signal could not be delivered to the relay.
///
/// Never fatal: the history deletion it follows has already committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("clear notification failed: {0}")]
pub struct NotifyError(pub String);
