//! Shared fixtures for integration tests.
//!
//! Starts the relay router in-process on an ephemeral port and provides a
//! small WebSocket client speaking the relay's JSON protocol.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use teamchat_relay::{AppState, build_router};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(3);
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Relay running in the test process
pub struct TestServer {
    addr: SocketAddr,
    pub state: Arc<AppState>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay with in-memory store and registry.
    pub async fn start() -> Self {
        Self::with_state(AppState::in_memory()).await
    }

    pub async fn with_state(state: AppState) -> Self {
        let state = Arc::new(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let app = build_router(state.clone());
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });
        Self { addr, state, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/api/socket", self.addr)
    }

    /// Poll `GET /api/rooms/{room}` until it reports `expected` connections.
    pub async fn wait_for_room_size(&self, room: &str, expected: u64) {
        let client = reqwest::Client::new();
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let body: Value = client
                .get(format!("{}/api/rooms/{}", self.base_url(), room))
                .send()
                .await
                .expect("Failed to send request")
                .json()
                .await
                .expect("Failed to parse JSON");
            if body["connections"] == expected {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "room '{room}' never reached {expected} connections (last: {body})"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// WebSocket test client
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url)
            .await
            .expect("Failed to connect WebSocket");
        Self { stream }
    }

    /// Connect and join `room`, waiting for the acknowledgement.
    pub async fn joined(server: &TestServer, room: &str) -> Self {
        let mut client = Self::connect(&server.ws_url()).await;
        client.join(room).await;
        client
    }

    pub async fn send_json(&mut self, value: Value) {
        self.stream
            .send(Message::Text(value.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join(&mut self, room: &str) {
        self.send_json(json!({"type": "join", "room": room})).await;
        let ack = self.recv_json().await;
        assert_eq!(ack["type"], "joined", "unexpected reply to join: {ack}");
        assert_eq!(ack["room"], room);
    }

    pub async fn say(&mut self, room: &str, message: &str, user: &str) {
        self.send_json(json!({"type": "message", "room": room, "message": message, "user": user}))
            .await;
    }

    /// Next JSON text frame, failing the test after a timeout.
    pub async fn recv_json(&mut self) -> Value {
        let next = async {
            while let Some(frame) = self.stream.next().await {
                if let Message::Text(text) = frame.expect("WebSocket error") {
                    return serde_json::from_str::<Value>(text.as_str())
                        .expect("Server sent invalid JSON");
                }
            }
            panic!("WebSocket closed while waiting for a frame");
        };
        tokio::time::timeout(RECV_TIMEOUT, next)
            .await
            .expect("Timed out waiting for a frame")
    }

    /// Assert that nothing arrives for a short window.
    pub async fn expect_silence(&mut self) {
        let result = tokio::time::timeout(SILENCE_WINDOW, self.stream.next()).await;
        assert!(result.is_err(), "expected no frame, got {result:?}");
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
