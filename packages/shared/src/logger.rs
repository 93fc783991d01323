//! Logger setup backed by `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build the default filter directive for a binary.
///
/// `teamchat_relay` and `tower_http` follow the requested level so request
/// traces show up next to the relay's own events.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    let crate_name = bin_name.replace('-', "_");
    format!(
        "{crate_name}={level},teamchat_relay={level},teamchat_shared={level},tower_http={level}"
    )
}

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when it is set.
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
