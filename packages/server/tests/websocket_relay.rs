//! WebSocket relay integration tests.
//!
//! Drives the relay through real WebSocket connections: room isolation,
//! self-delivery, boundary validation, join policy and disconnect cleanup.

mod fixtures;

use std::sync::Arc;

use async_trait::async_trait;
use fixtures::{TestServer, WsClient};
use serde_json::json;
use teamchat_relay::{
    AppState,
    domain::{
        MessageRepository, NewMessage, OpenJoinPolicy, RepositoryError, RoomId, StoredMessage,
        TeamJoinPolicy,
    },
    infrastructure::{InMemoryMessageRepository, InMemoryRoomRegistry},
};
use tokio::sync::Notify;

/// Store whose `append` waits until the test opens the gate
struct GatedRepository {
    inner: InMemoryMessageRepository,
    entered: Arc<Notify>,
    gate: Arc<Notify>,
}

#[async_trait]
impl MessageRepository for GatedRepository {
    async fn append(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError> {
        self.entered.notify_one();
        self.gate.notified().await;
        self.inner.append(message).await
    }

    async fn list_by_room(&self, room: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError> {
        self.inner.list_by_room(room).await
    }

    async fn delete_by_room(&self, room: &RoomId) -> Result<u64, RepositoryError> {
        self.inner.delete_by_room(room).await
    }
}

fn room(key: &str) -> RoomId {
    RoomId::new(key.to_string()).unwrap()
}

#[tokio::test]
async fn test_message_reaches_room_members_only() {
    // テスト項目: 送信メッセージは同じルームの全員（送信者含む）に届き、他ルームには届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = WsClient::joined(&server, "team-42").await;
    let mut bob = WsClient::joined(&server, "team-42").await;
    let mut carol = WsClient::joined(&server, "team-99").await;

    // when (操作):
    alice
        .send_json(json!({
            "type": "message",
            "room": "team-42",
            "message": "hi",
            "user": "alice",
            "userId": "u1"
        }))
        .await;

    // then (期待する結果):
    let to_alice = alice.recv_json().await;
    let to_bob = bob.recv_json().await;
    assert_eq!(to_alice, to_bob);
    assert_eq!(to_alice["type"], "message");
    assert_eq!(to_alice["room"], "team-42");
    assert_eq!(to_alice["message"], "hi");
    assert_eq!(to_alice["user"], "alice");
    assert_eq!(to_alice["userId"], "u1");
    assert!(to_alice["id"].as_str().is_some());
    assert!(to_alice["createdAt"].as_str().unwrap().ends_with('Z'));
    carol.expect_silence().await;

    let stored = server
        .state
        .repository
        .list_by_room(&room("team-42"))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.as_str(), to_alice["id"].as_str().unwrap());
    assert!(server
        .state
        .repository
        .list_by_room(&room("team-99"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_lone_member_receives_own_message() {
    // テスト項目: ルームに自分しかいなくても自分のメッセージを受け取る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = WsClient::joined(&server, "team-42").await;

    // when (操作):
    alice.say("team-42", "echo?", "alice").await;

    // then (期待する結果):
    let event = alice.recv_json().await;
    assert_eq!(event["type"], "message");
    assert_eq!(event["message"], "echo?");
    assert!(event["userId"].is_null());
}

#[tokio::test]
async fn test_send_without_join_still_persists() {
    // テスト項目: 未参加ルームへの送信も保存され、そのルームのメンバーに届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut outsider = WsClient::connect(&server.ws_url()).await;
    let mut bob = WsClient::joined(&server, "team-42").await;

    // when (操作):
    outsider.say("team-42", "knock knock", "outsider").await;

    // then (期待する結果):
    assert_eq!(bob.recv_json().await["message"], "knock knock");
    outsider.expect_silence().await;
}

#[tokio::test]
async fn test_invalid_message_is_rejected_to_sender_only() {
    // テスト項目: 不正なメッセージは送信者にだけ error が返り、保存も配送もされない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = WsClient::joined(&server, "team-42").await;
    let mut bob = WsClient::joined(&server, "team-42").await;

    for frame in [
        json!({"type": "message", "room": "team-42", "message": "", "user": "alice"}),
        json!({"type": "message", "room": "team-42", "message": "   ", "user": "alice"}),
        json!({"type": "message", "room": "team-42", "message": "hi", "user": ""}),
        json!({"type": "message", "room": "", "message": "hi", "user": "alice"}),
        json!({"type": "message", "room": "team-42", "message": "hi"}),
        json!({"type": "shout", "room": "team-42"}),
    ] {
        // when (操作):
        alice.send_json(frame).await;

        // then (期待する結果):
        let reply = alice.recv_json().await;
        assert_eq!(reply["type"], "error", "unexpected reply: {reply}");
        assert!(reply["message"].as_str().is_some());
    }

    bob.expect_silence().await;
    assert!(server
        .state
        .repository
        .list_by_room(&room("team-42"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_non_json_frame_is_rejected() {
    // テスト項目: JSON でないフレームには error が返り、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = WsClient::joined(&server, "team-42").await;

    // when (操作):
    alice.send_raw("hello?").await;

    // then (期待する結果):
    assert_eq!(alice.recv_json().await["type"], "error");
    alice.say("team-42", "still here", "alice").await;
    assert_eq!(alice.recv_json().await["message"], "still here");
}

#[tokio::test]
async fn test_join_is_idempotent() {
    // テスト項目: 同じルームに 2 回 join してもメッセージは 1 回だけ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = WsClient::joined(&server, "team-42").await;
    alice.join("team-42").await;
    server.wait_for_room_size("team-42", 1).await;

    // when (操作):
    alice.say("team-42", "once", "alice").await;

    // then (期待する結果):
    assert_eq!(alice.recv_json().await["message"], "once");
    alice.expect_silence().await;
}

#[tokio::test]
async fn test_join_without_room_is_rejected() {
    // テスト項目: room の無い join には error が返る
    let server = TestServer::start().await;
    let mut alice = WsClient::connect(&server.ws_url()).await;

    alice.send_json(json!({"type": "join"})).await;

    assert_eq!(alice.recv_json().await["type"], "error");
    server.wait_for_room_size("team-42", 0).await;
}

#[tokio::test]
async fn test_disconnect_removes_membership() {
    // テスト項目: 切断したハンドルはルームから外れ、残りのメンバーには配送が続く
    // given (前提条件):
    let server = TestServer::start().await;
    let alice = WsClient::joined(&server, "team-42").await;
    let mut bob = WsClient::joined(&server, "team-42").await;
    server.wait_for_room_size("team-42", 2).await;

    // when (操作):
    alice.close().await;

    // then (期待する結果):
    server.wait_for_room_size("team-42", 1).await;
    bob.say("team-42", "anyone?", "bob").await;
    assert_eq!(bob.recv_json().await["message"], "anyone?");
}

#[tokio::test]
async fn test_team_policy_admits_own_team_only() {
    // テスト項目: team ポリシーでは自チームのルームにのみ参加できる
    // given (前提条件):
    let state = AppState::new(
        Arc::new(InMemoryMessageRepository::new()),
        Arc::new(InMemoryRoomRegistry::new()),
        Arc::new(TeamJoinPolicy),
    );
    let server = TestServer::with_state(state).await;
    let url = format!("{}?team_id=42", server.ws_url());
    let mut member = WsClient::connect(&url).await;

    // when (操作):
    member.join("team-42").await;
    member
        .send_json(json!({"type": "join", "room": "team-99"}))
        .await;

    // then (期待する結果):
    let reply = member.recv_json().await;
    assert_eq!(reply["type"], "error");
    server.wait_for_room_size("team-42", 1).await;
    server.wait_for_room_size("team-99", 0).await;

    let mut anonymous = WsClient::connect(&server.ws_url()).await;
    anonymous
        .send_json(json!({"type": "join", "room": "team-42"}))
        .await;
    assert_eq!(anonymous.recv_json().await["type"], "error");
}

#[tokio::test]
async fn test_long_values_are_relayed() {
    // テスト項目: 長いルームキー・表示名・本文にも上限はなく、保存・配送される
    // given (前提条件):
    let server = TestServer::start().await;
    let long_room = "r".repeat(101);
    let long_user = "u".repeat(101);
    let long_body = "a".repeat(10_001);
    let mut alice = WsClient::joined(&server, &long_room).await;

    // when (操作):
    alice.say(&long_room, &long_body, &long_user).await;

    // then (期待する結果):
    let event = alice.recv_json().await;
    assert_eq!(event["type"], "message");
    assert_eq!(event["room"], long_room.as_str());
    assert_eq!(event["user"], long_user.as_str());
    assert_eq!(event["message"], long_body.as_str());
    let stored = server
        .state
        .repository
        .list_by_room(&room(&long_room))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_send_completes_after_sender_disconnects() {
    // テスト項目: 送信処理中に送信者が切断しても、保存と他メンバーへの配送は完了する
    // given (前提条件): append が止まったままになるストア
    let entered = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let state = AppState::new(
        Arc::new(GatedRepository {
            inner: InMemoryMessageRepository::new(),
            entered: entered.clone(),
            gate: gate.clone(),
        }),
        Arc::new(InMemoryRoomRegistry::new()),
        Arc::new(OpenJoinPolicy),
    );
    let server = TestServer::with_state(state).await;
    let mut alice = WsClient::joined(&server, "team-42").await;
    let mut bob = WsClient::joined(&server, "team-42").await;

    // when (操作): append の途中で送信者が切断し、その後 append が進む
    alice.say("team-42", "last words", "alice").await;
    entered.notified().await;
    alice.close().await;
    gate.notify_one();

    // then (期待する結果):
    let event = bob.recv_json().await;
    assert_eq!(event["type"], "message");
    assert_eq!(event["message"], "last words");
    let stored = server
        .state
        .repository
        .list_by_room(&room("team-42"))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    server.wait_for_room_size("team-42", 1).await;
}
