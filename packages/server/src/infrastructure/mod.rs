//! Infrastructure layer
//!
//! ドメイン層の trait 実装（メッセージストア、ルームレジストリ）、
//! 通信用 DTO、リレーの HTTP ゲートウェイクライアントを提供します。

pub mod dto;
pub mod gateway_client;
pub mod registry;
pub mod repository;

pub use gateway_client::{GatewayClientError, HttpGatewayClient};
pub use registry::InMemoryRoomRegistry;
pub use repository::{InMemoryMessageRepository, SqliteMessageRepository};
