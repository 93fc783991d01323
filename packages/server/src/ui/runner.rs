//! Relay server runner.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{
    config::{JoinPolicyKind, ServeArgs, StoreKind},
    domain::{JoinPolicy, MessageRepository, OpenJoinPolicy, TeamJoinPolicy},
    error::ServerError,
    infrastructure::{InMemoryMessageRepository, InMemoryRoomRegistry, SqliteMessageRepository},
};

use super::{router::build_router, signal::shutdown_signal, state::AppState};

/// Build the relay state described by `args`.
pub async fn build_state(args: &ServeArgs) -> Result<AppState, ServerError> {
    let repository: Arc<dyn MessageRepository> = match args.store {
        StoreKind::Sqlite => Arc::new(SqliteMessageRepository::connect(&args.database_url).await?),
        StoreKind::Memory => {
            tracing::warn!("Using in-memory message store; history is lost on restart");
            Arc::new(InMemoryMessageRepository::new())
        }
    };

    let join_policy: Arc<dyn JoinPolicy> = match args.join_policy {
        JoinPolicyKind::Open => Arc::new(OpenJoinPolicy),
        JoinPolicyKind::Team => Arc::new(TeamJoinPolicy),
    };

    Ok(AppState::new(
        repository,
        Arc::new(InMemoryRoomRegistry::new()),
        join_policy,
    ))
}

/// Run the relay until a shutdown signal arrives.
pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    let state = Arc::new(build_state(&args).await?);
    let app = build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Relay listening on http://{}", addr);
    tracing::info!("WebSocket endpoint -> ws://{}/api/socket", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    Ok(())
}
