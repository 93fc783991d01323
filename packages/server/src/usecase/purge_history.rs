//! UseCase: 履歴削除処理
//!
//! 「チャットをクリア」の流れを 2 つの独立した手順で実行します。
//!
//! 1. ストアからルームのメッセージを削除（失敗は呼び出し側へ返す）
//! 2. リレーへクリア通知（失敗はログのみ。削除は成功扱い）
//!
//! 2 つの手順の間に不整合の窓があります。通知が届かなかった接続中の
//! クライアントは、次に履歴を読み直すまで古い表示のままです。

use std::sync::Arc;

use crate::domain::{ClearNotifier, MessageRepository, RoomId};

use super::error::PurgeHistoryError;

/// 履歴削除のユースケース
pub struct PurgeHistoryUseCase {
    repository: Arc<dyn MessageRepository>,
    notifier: Arc<dyn ClearNotifier>,
}

impl PurgeHistoryUseCase {
    /// 新しい PurgeHistoryUseCase を作成
    pub fn new(repository: Arc<dyn MessageRepository>, notifier: Arc<dyn ClearNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// 履歴削除を実行し、削除件数を返す
    pub async fn execute(&self, room: &RoomId) -> Result<u64, PurgeHistoryError> {
        let deleted = self.repository.delete_by_room(room).await?;
        tracing::info!("Deleted {} message(s) from '{}'", deleted, room);

        if let Err(e) = self.notifier.notify_cleared(room).await {
            tracing::warn!("History of '{}' deleted but clients were not notified: {}", room, e);
        }

        Ok(deleted)
    }
}
