//! UseCase: クリア通知処理
//!
//! ルームの接続中クライアントへ `chat:cleared` を送ります。
//! メッセージストアには触れません（削除は呼び出し側の責務）。

use std::sync::Arc;

use crate::{
    domain::{RoomId, RoomRegistry},
    infrastructure::dto::websocket::ServerEvent,
};

/// クリア通知のユースケース
pub struct ClearRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ClearRoomUseCase {
    /// 新しい ClearRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// クリア通知を実行し、配送数を返す
    pub async fn execute(&self, room: &RoomId) -> usize {
        let event = ServerEvent::ChatCleared {
            room: room.as_str().to_string(),
        };
        let delivered = self.registry.broadcast(room, event.to_json()).await;
        tracing::info!("Broadcasted chat:cleared to {} handle(s) in '{}'", delivered, room);
        delivered
    }
}
