//! UseCase: メッセージ送信処理
//!
//! WebSocket の `message` イベントとゲートウェイの broadcast の両方が
//! このユースケースを通ります。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageCommand の必須項目検証
//! - SendMessageUseCase::execute() の「永続化してからブロードキャスト」の順序
//!
//! ### なぜこのテストが必要か
//! - 永続化に失敗したメッセージがクライアントに見えてはならない
//!   （リロードで消えるメッセージになる）
//! - 送信者自身もブロードキャストを受け取る（ローカルエコーしない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じルームの全員（送信者を含む）に届く
//! - 異常系：必須項目欠落、ストア障害
//! - エッジケース：他ルームのハンドルには届かない

use std::sync::Arc;

use crate::{
    domain::{
        AuthorName, MessageContent, MessageRepository, NewMessage, RoomId, RoomRegistry,
        StoredMessage, UserId,
    },
    infrastructure::dto::websocket::{MessagePayload, ServerEvent},
};

use super::error::SendMessageError;

/// 検証済みの送信コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub room: RoomId,
    pub content: MessageContent,
    pub author: AuthorName,
    pub author_id: Option<UserId>,
}

impl SendMessageCommand {
    /// 境界で受け取った生の値を検証する
    ///
    /// 欠落している項目は空文字として扱い、空の検証エラーになります。
    pub fn parse(
        room: Option<String>,
        message: Option<String>,
        user: Option<String>,
        user_id: Option<String>,
    ) -> Result<Self, SendMessageError> {
        Ok(Self {
            room: RoomId::new(room.unwrap_or_default())?,
            content: MessageContent::new(message.unwrap_or_default())?,
            author: AuthorName::new(user.unwrap_or_default())?,
            author_id: UserId::optional(user_id),
        })
    }
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    /// 保存されたメッセージ（サーバー採番のタイムスタンプを含む）
    pub message: StoredMessage,
    /// ブロードキャストを受け付けたハンドル数
    pub delivered: usize,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn MessageRepository>,
    registry: Arc<dyn RoomRegistry>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn MessageRepository>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 1. ストアに追記（失敗したらここで終了、ブロードキャストしない）
    /// 2. 保存された値そのままをルームの全ハンドルへブロードキャスト
    ///
    /// # Returns
    ///
    /// * `Ok(SendOutcome)` - 保存済みメッセージと配送数
    /// * `Err(SendMessageError::Persistence)` - 永続化失敗
    pub async fn execute(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendOutcome, SendMessageError> {
        let room = command.room.clone();
        let new_message = NewMessage::new(
            command.room,
            command.author,
            command.author_id,
            command.content,
        );

        let stored = self.repository.append(new_message).await.map_err(|e| {
            tracing::error!("Failed to persist message for room '{}': {}", room, e);
            SendMessageError::Persistence(e)
        })?;

        let event = ServerEvent::Message(MessagePayload::from(&stored));
        let delivered = self.registry.broadcast(&room, event.to_json()).await;
        tracing::debug!(
            "Message '{}' stored and delivered to {} handle(s) in '{}'",
            stored.id,
            delivered,
            room
        );

        Ok(SendOutcome {
            message: stored,
            delivered,
        })
    }
}
