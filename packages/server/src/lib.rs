//! Realtime chat relay library.
//!
//! Accepts WebSocket connections, joins them to team rooms, persists chat
//! messages and fans them out to every member of the room. A small HTTP
//! gateway lets non-connected processes inject messages and clear-signals.

pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::Cli;
pub use ui::{AppState, build_router, run as run_server};
