//! InMemory Message Repository 実装
//!
//! Vec を追記専用ログとして使用します。プロセス再起動で消えるため、
//! テストと `--store memory` 用です。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    MessageIdFactory, MessageRepository, NewMessage, RepositoryError, RoomId, StoredMessage,
    Timestamp,
};

/// インメモリ Message Repository 実装
#[derive(Default)]
pub struct InMemoryMessageRepository {
    /// 挿入順に並んだ保存済みメッセージ
    messages: Mutex<Vec<StoredMessage>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 全ルーム合計の保存件数
    pub async fn count(&self) -> usize {
        self.messages.lock().await.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError> {
        let created_at = message.created_at.unwrap_or_else(Timestamp::now);
        let stored = StoredMessage::from_new(MessageIdFactory::generate(), message, created_at);

        let mut messages = self.messages.lock().await;
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_room(&self, room: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let mut found: Vec<StoredMessage> = messages
            .iter()
            .filter(|m| &m.room == room)
            .cloned()
            .collect();
        // stable sort: 同一タイムスタンプは挿入順のまま
        found.sort_by_key(|m| m.created_at);
        Ok(found)
    }

    async fn delete_by_room(&self, room: &RoomId) -> Result<u64, RepositoryError> {
        let mut messages = self.messages.lock().await;
        let before = messages.len();
        messages.retain(|m| &m.room != room);
        Ok((before - messages.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorName, MessageContent, UserId};

    fn message(room: &str, body: &str) -> NewMessage {
        NewMessage::new(
            RoomId::new(room.to_string()).unwrap(),
            AuthorName::new("alice".to_string()).unwrap(),
            UserId::optional(None),
            MessageContent::new(body.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_timestamp() {
        // テスト項目: append は ID とサーバー時刻を採番して返す
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();

        // when (操作):
        let first = repo.append(message("team-42", "hi")).await.unwrap();
        let second = repo.append(message("team-42", "yo")).await.unwrap();

        // then (期待する結果):
        assert_ne!(first.id, second.id);
        assert!(first.created_at.value() > 0);
        assert_eq!(repo.count().await, 2);
    }

    #[tokio::test]
    async fn test_append_keeps_supplied_timestamp() {
        // テスト項目: タイムスタンプ指定済みのメッセージはその値で保存される
        let repo = InMemoryMessageRepository::new();
        let stored = repo
            .append(message("team-42", "hi").at(Timestamp::new(1234)))
            .await
            .unwrap();
        assert_eq!(stored.created_at, Timestamp::new(1234));
    }

    #[tokio::test]
    async fn test_list_by_room_orders_by_timestamp_then_insertion() {
        // テスト項目: 作成時刻昇順、同時刻は挿入順で返される
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        repo.append(message("team-42", "late").at(Timestamp::new(300)))
            .await
            .unwrap();
        repo.append(message("team-42", "tie-a").at(Timestamp::new(100)))
            .await
            .unwrap();
        repo.append(message("team-99", "other").at(Timestamp::new(50)))
            .await
            .unwrap();
        repo.append(message("team-42", "tie-b").at(Timestamp::new(100)))
            .await
            .unwrap();

        // when (操作):
        let listed = repo
            .list_by_room(&RoomId::new("team-42".to_string()).unwrap())
            .await
            .unwrap();

        // then (期待する結果):
        let bodies: Vec<&str> = listed.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(bodies, vec!["tie-a", "tie-b", "late"]);
    }

    #[tokio::test]
    async fn test_delete_by_room_reports_count_and_is_idempotent() {
        // テスト項目: 削除件数を返し、2 回目は 0 件になる
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        let room = RoomId::new("team-42".to_string()).unwrap();
        repo.append(message("team-42", "a")).await.unwrap();
        repo.append(message("team-42", "b")).await.unwrap();
        repo.append(message("team-99", "c")).await.unwrap();

        // when (操作):
        let first = repo.delete_by_room(&room).await.unwrap();
        let second = repo.delete_by_room(&room).await.unwrap();

        // then (期待する結果):
        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(repo.count().await, 1);
    }
}
