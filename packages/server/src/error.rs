//! Top-level errors of the relay binary.

use thiserror::Error;

use crate::{
    domain::{RepositoryError, ValueObjectError},
    infrastructure::GatewayClientError,
    usecase::PurgeHistoryError,
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error(transparent)]
    Store(#[from] RepositoryError),

    #[error("invalid room: {0}")]
    InvalidRoom(#[from] ValueObjectError),

    #[error(transparent)]
    Gateway(#[from] GatewayClientError),

    #[error(transparent)]
    Purge(#[from] PurgeHistoryError),
}
