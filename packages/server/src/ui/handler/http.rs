//! HTTP API endpoint handlers.
//!
//! The broadcast gateway lets trusted callers inject messages and
//! clear-signals without holding a socket. Callers authorize before
//! calling; the gateway itself only validates.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    domain::RoomId,
    infrastructure::dto::{
        http::{BroadcastRequest, ClearRequest, OkResponse, RoomStatsDto},
        websocket::MessagePayload,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{
        ClearRoomUseCase, ListHistoryUseCase, SendMessageCommand, SendMessageError,
        SendMessageUseCase,
    },
};

const BROADCAST_REQUIRED: &str = "room, message, user required";
const CLEAR_REQUIRED: &str = "room required";

/// Health check endpoint
pub async fn health_check() -> Json<OkResponse> {
    Json(OkResponse::ok())
}

/// `POST /api/chat/broadcast`: persist, then fan out to the room
pub async fn broadcast(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BroadcastRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected broadcast body: {}", e);
        ApiError::BadRequest(BROADCAST_REQUIRED.to_string())
    })?;

    let command = SendMessageCommand::parse(
        request.room,
        request.message,
        request.user,
        request.user_id,
    )
    .map_err(|e| {
        tracing::warn!("Rejected broadcast: {}", e);
        ApiError::BadRequest(BROADCAST_REQUIRED.to_string())
    })?;

    let usecase = SendMessageUseCase::new(state.repository.clone(), state.registry.clone());
    match usecase.execute(command).await {
        Ok(outcome) => {
            tracing::info!(
                "Gateway broadcast '{}' to {} handle(s) in '{}'",
                outcome.message.id,
                outcome.delivered,
                outcome.message.room
            );
            Ok(Json(OkResponse::ok()))
        }
        Err(SendMessageError::Invalid(_)) => {
            Err(ApiError::BadRequest(BROADCAST_REQUIRED.to_string()))
        }
        Err(SendMessageError::Persistence(_)) => {
            Err(ApiError::Internal("broadcast failed".to_string()))
        }
    }
}

/// `POST /api/chat/clear`: tell a room's clients to wipe their view
pub async fn clear(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClearRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest(CLEAR_REQUIRED.to_string()))?;
    let room = RoomId::new(request.room.unwrap_or_default())
        .map_err(|_| ApiError::BadRequest(CLEAR_REQUIRED.to_string()))?;

    ClearRoomUseCase::new(state.registry.clone())
        .execute(&room)
        .await;
    Ok(Json(OkResponse::ok()))
}

/// `GET /api/rooms/{room}`: live connection count (diagnostics)
pub async fn room_stats(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomStatsDto>, ApiError> {
    let room = RoomId::new(room).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let connections = state.registry.room_size(&room).await;
    Ok(Json(RoomStatsDto {
        room: room.into_string(),
        connections,
    }))
}

/// `GET /api/rooms/{room}/messages`: stored history, oldest first
pub async fn room_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<Vec<MessagePayload>>, ApiError> {
    let room = RoomId::new(room).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let history = ListHistoryUseCase::new(state.repository.clone())
        .execute(&room)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load history of '{}': {}", room, e);
            ApiError::Internal("history unavailable".to_string())
        })?;
    Ok(Json(history.iter().map(MessagePayload::from).collect()))
}
