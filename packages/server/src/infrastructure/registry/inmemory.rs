//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! ルームごとの接続ハンドル集合と、ハンドルごとの送信チャンネルを
//! HashMap で保持します。永続化はしません。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{ConnectionId, RoomId, RoomRegistry};

/// 接続ハンドル 1 つ分の状態
struct HandleEntry {
    /// WebSocket 書き込みタスクへの送信チャンネル
    sender: UnboundedSender<String>,
    /// 参加済みのルーム
    rooms: HashSet<RoomId>,
}

#[derive(Default)]
struct RegistryState {
    handles: HashMap<ConnectionId, HandleEntry>,
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl RegistryState {
    fn detach(&mut self, handle: &ConnectionId, room: &RoomId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(handle);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}

/// インメモリ Room Registry 実装
///
/// 状態全体を 1 つの Mutex で保護し、各操作を単一のクリティカル
/// セクションとして実行します。
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みハンドル数
    pub async fn count_handles(&self) -> usize {
        self.state.lock().await.handles.len()
    }

    /// メンバーが 1 人以上いるルーム数
    pub async fn count_rooms(&self) -> usize {
        self.state.lock().await.rooms.len()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn register(&self, handle: ConnectionId, sender: UnboundedSender<String>) {
        let mut state = self.state.lock().await;
        state.handles.insert(
            handle,
            HandleEntry {
                sender,
                rooms: HashSet::new(),
            },
        );
    }

    async fn join(&self, handle: &ConnectionId, room: &RoomId) {
        let mut state = self.state.lock().await;
        let Some(entry) = state.handles.get_mut(handle) else {
            tracing::debug!("Ignoring join of unknown handle '{}' to '{}'", handle, room);
            return;
        };
        entry.rooms.insert(room.clone());
        state
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(handle.clone());
    }

    async fn leave(&self, handle: &ConnectionId, room: &RoomId) {
        let mut state = self.state.lock().await;
        if let Some(entry) = state.handles.get_mut(handle) {
            entry.rooms.remove(room);
        }
        state.detach(handle, room);
    }

    async fn leave_all(&self, handle: &ConnectionId) {
        let mut state = self.state.lock().await;
        let Some(entry) = state.handles.remove(handle) else {
            return;
        };
        for room in &entry.rooms {
            state.detach(handle, room);
        }
    }

    async fn broadcast(&self, room: &RoomId, payload: String) -> usize {
        let state = self.state.lock().await;
        let Some(members) = state.rooms.get(room) else {
            return 0;
        };

        let mut delivered = 0;
        for handle in members {
            let Some(entry) = state.handles.get(handle) else {
                continue;
            };
            if entry.sender.send(payload.clone()).is_err() {
                tracing::warn!("Failed to deliver to handle '{}' in room '{}'", handle, room);
                continue;
            }
            delivered += 1;
        }
        delivered
    }

    async fn send_to(&self, handle: &ConnectionId, payload: String) -> bool {
        let state = self.state.lock().await;
        state
            .handles
            .get(handle)
            .is_some_and(|entry| entry.sender.send(payload).is_ok())
    }

    async fn room_size(&self, room: &RoomId) -> usize {
        let state = self.state.lock().await;
        state.rooms.get(room).map_or(0, HashSet::len)
    }
}
