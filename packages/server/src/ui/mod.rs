//! UI layer: the relay's HTTP and WebSocket surface.

pub mod error;
mod handler;
pub mod router;
mod runner;
mod signal;
pub mod state;

pub use router::build_router;
pub use runner::{build_state, run};
pub use state::AppState;
