//! Team chat relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin teamchat-relay -- --store memory
//! ```

use clap::Parser;
use teamchat_relay::{Cli, command, config::Command};
use teamchat_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &cli.log_level);

    let result = match cli.into_command() {
        Command::Serve(args) => teamchat_relay::run_server(args).await,
        Command::Say(args) => command::say(args).await,
        Command::Purge(args) => command::purge(args).await.map(|deleted| {
            tracing::info!("Purged {} message(s)", deleted);
        }),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
