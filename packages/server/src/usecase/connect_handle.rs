//! UseCase: 接続受付処理
//!
//! 新しい接続ハンドルを採番し、空のルーム所属で Registry に登録します。
//! 永続化は行いません。

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{ConnectionId, ConnectionIdFactory, RoomRegistry};

/// 接続受付のユースケース
pub struct ConnectHandleUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ConnectHandleUseCase {
    /// 新しい ConnectHandleUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を登録し、採番したハンドル ID を返す
    ///
    /// # Arguments
    ///
    /// * `sender` - このハンドル宛てのメッセージ送信チャンネル
    pub async fn execute(&self, sender: UnboundedSender<String>) -> ConnectionId {
        let handle = ConnectionIdFactory::generate();
        self.registry.register(handle.clone(), sender).await;
        handle
    }
}
