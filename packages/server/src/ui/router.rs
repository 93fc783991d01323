//! Route table of the relay.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{handler, state::AppState};

/// Build the relay router around an explicitly constructed state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/socket", get(handler::websocket_handler))
        .route("/api/chat/broadcast", post(handler::broadcast))
        .route("/api/chat/clear", post(handler::clear))
        .route("/api/rooms/{room}", get(handler::room_stats))
        .route("/api/rooms/{room}/messages", get(handler::room_messages))
        .route("/api/health", get(handler::health_check))
        .route("/health", get(handler::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
