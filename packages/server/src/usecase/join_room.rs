//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加ポリシーの判定、Registry への追加、joined 応答の送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：open ポリシーでの参加
//! - 異常系：空のルームキー、team ポリシーでの他チームへの参加

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, JoinPolicy, Principal, RoomId, RoomRegistry},
    infrastructure::dto::websocket::ServerEvent,
};

use super::error::JoinError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    policy: Arc<dyn JoinPolicy>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, policy: Arc<dyn JoinPolicy>) -> Self {
        Self { registry, policy }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `handle` - 参加するハンドル
    /// * `principal` - ハンドルの接続主体
    /// * `room` - 参加先のルームキー（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 参加したルーム
    /// * `Err(JoinError)` - 参加失敗（Registry は変更されない）
    pub async fn execute(
        &self,
        handle: &ConnectionId,
        principal: &Principal,
        room: Option<String>,
    ) -> Result<RoomId, JoinError> {
        let room = RoomId::new(room.unwrap_or_default())?;

        if !self.policy.admits(principal, &room) {
            return Err(JoinError::NotPermitted(room.into_string()));
        }

        self.registry.join(handle, &room).await;

        let ack = ServerEvent::Joined {
            room: room.as_str().to_string(),
        };
        self.registry.send_to(handle, ack.to_json()).await;

        Ok(room)
    }
}
