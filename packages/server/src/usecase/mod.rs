//! UseCase 層
//!
//! リレーの各操作を実装するレイヤー。
//! UI 層から呼び出され、Domain 層の trait を操作します。

pub mod clear_room;
pub mod connect_handle;
pub mod disconnect_handle;
pub mod error;
pub mod join_room;
pub mod list_history;
pub mod purge_history;
pub mod send_message;

pub use clear_room::ClearRoomUseCase;
pub use connect_handle::ConnectHandleUseCase;
pub use disconnect_handle::DisconnectHandleUseCase;
pub use error::{JoinError, PurgeHistoryError, SendMessageError};
pub use join_room::JoinRoomUseCase;
pub use list_history::ListHistoryUseCase;
pub use purge_history::PurgeHistoryUseCase;
pub use send_message::{SendMessageCommand, SendMessageUseCase, SendOutcome};
