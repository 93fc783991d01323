//! UseCase: 切断処理
//!
//! ハンドルを全ルームから外し、送信チャンネルを破棄します。
//! 送信途中のメッセージは既に永続化済みであればロールバックしません。

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRegistry};

/// 切断のユースケース
pub struct DisconnectHandleUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl DisconnectHandleUseCase {
    /// 新しい DisconnectHandleUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 切断を実行
    pub async fn execute(&self, handle: &ConnectionId) {
        self.registry.leave_all(handle).await;
    }
}
