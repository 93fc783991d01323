//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Principal},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::{AppState, ConnectQuery},
    usecase::{
        ConnectHandleUseCase, DisconnectHandleUseCase, JoinRoomUseCase, SendMessageCommand,
        SendMessageUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let principal = query.principal();
    ws.on_upgrade(move |socket| handle_socket(socket, state, principal))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, principal: Principal) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this handle to receive broadcasts
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let handle = ConnectHandleUseCase::new(state.registry.clone())
        .execute(tx)
        .await;
    tracing::info!("Socket connected: {}", handle);

    // Drain broadcasts addressed to this handle into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_state = state.clone();
    let recv_handle = handle.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on {}: {}", recv_handle, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_event(&recv_state, &recv_handle, &principal, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::debug!("Socket {} requested close", recv_handle);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    DisconnectHandleUseCase::new(state.registry.clone())
        .execute(&handle)
        .await;
    tracing::info!("Socket disconnected: {}", handle);
}

/// Process one inbound frame to completion.
async fn handle_event(state: &AppState, handle: &ConnectionId, principal: &Principal, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Malformed event from {}: {}", handle, e);
            reply_error(state, handle, format!("malformed event: {e}")).await;
            return;
        }
    };

    match event {
        ClientEvent::Join { room } => {
            let usecase = JoinRoomUseCase::new(state.registry.clone(), state.join_policy.clone());
            match usecase.execute(handle, principal, room).await {
                Ok(room) => tracing::info!("Socket {} joined room: {}", handle, room),
                Err(e) => {
                    tracing::warn!("Rejected join from {}: {}", handle, e);
                    reply_error(state, handle, e.to_string()).await;
                }
            }
        }
        ClientEvent::Message {
            room,
            message,
            user,
            user_id,
        } => {
            let command = match SendMessageCommand::parse(room, message, user, user_id) {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!("Rejected message from {}: {}", handle, e);
                    reply_error(state, handle, e.to_string()).await;
                    return;
                }
            };

            // Detached so that a disconnect mid-send cannot cancel the
            // fan-out of an already persisted message.
            let usecase = SendMessageUseCase::new(state.repository.clone(), state.registry.clone());
            match tokio::spawn(async move { usecase.execute(command).await }).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => reply_error(state, handle, e.to_string()).await,
                Err(e) => tracing::error!("Send task of {} failed: {}", handle, e),
            }
        }
    }
}

async fn reply_error(state: &AppState, handle: &ConnectionId, message: String) {
    let event = ServerEvent::Error { message };
    state.registry.send_to(handle, event.to_json()).await;
}
