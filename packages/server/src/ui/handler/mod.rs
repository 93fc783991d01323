//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{broadcast, clear, health_check, room_messages, room_stats};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
