//! UseCase: 履歴取得処理
//!
//! 後から参加したクライアントが過去のメッセージを再生するための読み出し。

use std::sync::Arc;

use crate::domain::{MessageRepository, RepositoryError, RoomId, StoredMessage};

/// 履歴取得のユースケース
pub struct ListHistoryUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl ListHistoryUseCase {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// ルームのメッセージを作成時刻の昇順で返す
    pub async fn execute(&self, room: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError> {
        self.repository.list_by_room(room).await
    }
}
