//! Command-line configuration.
//!
//! Every option can also be supplied through the environment, which is how
//! the relay is configured when deployed next to the web application.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{RoomId, ValueObjectError};

/// Realtime chat relay for team rooms
#[derive(Debug, Parser)]
#[command(name = "teamchat-relay", version, about)]
pub struct Cli {
    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

impl Cli {
    /// The subcommand to run; `serve` when none was given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the relay (default)
    Serve(ServeArgs),
    /// Inject a message into a room through a running relay
    Say(SayArgs),
    /// Delete a room's history, then tell a running relay to clear clients
    Purge(PurgeArgs),
}

/// Where messages are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

/// Which joins are admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JoinPolicyKind {
    /// Any connection may join any room
    Open,
    /// Only `team-<team_id>` of the connection's `team_id` query parameter
    Team,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "SOCKET_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Message store backend
    #[arg(long, value_enum, default_value_t = StoreKind::Sqlite)]
    pub store: StoreKind,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://teamchat.db?mode=rwc")]
    pub database_url: String,

    /// Room admission policy
    #[arg(long, value_enum, env = "JOIN_POLICY", default_value_t = JoinPolicyKind::Open)]
    pub join_policy: JoinPolicyKind,
}

/// Target room, given either literally or as a team id
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct RoomArgs {
    /// Room key, e.g. `team-42`
    #[arg(long)]
    pub room: Option<String>,

    /// Team id; the room key is derived as `team-<id>`
    #[arg(long)]
    pub team: Option<String>,
}

impl RoomArgs {
    pub fn resolve(&self) -> Result<RoomId, ValueObjectError> {
        match (&self.room, &self.team) {
            (Some(room), _) => RoomId::new(room.clone()),
            (None, Some(team)) => RoomId::for_team(team),
            (None, None) => Err(ValueObjectError::RoomIdEmpty),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SayArgs {
    /// Base URL of the relay's gateway
    #[arg(long, env = "SOCKET_SERVER_URL", default_value = "http://localhost:3001")]
    pub gateway_url: String,

    #[command(flatten)]
    pub target: RoomArgs,

    /// Author display name
    #[arg(long)]
    pub user: String,

    /// Author id
    #[arg(long)]
    pub user_id: Option<String>,

    /// Message body
    pub message: String,
}

#[derive(Debug, Clone, Args)]
pub struct PurgeArgs {
    /// Base URL of the relay's gateway
    #[arg(long, env = "SOCKET_SERVER_URL", default_value = "http://localhost:3001")]
    pub gateway_url: String,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://teamchat.db?mode=rwc")]
    pub database_url: String,

    #[command(flatten)]
    pub target: RoomArgs,
}
