//! Shared utilities for the team chat relay.
//!
//! Logger initialisation and time helpers used by the relay binary,
//! its library and the integration tests.

pub mod logger;
pub mod time;
