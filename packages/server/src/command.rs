//! Operator subcommands that talk to a running relay.

use std::sync::Arc;

use crate::{
    config::{PurgeArgs, SayArgs},
    error::ServerError,
    infrastructure::{HttpGatewayClient, SqliteMessageRepository},
    usecase::PurgeHistoryUseCase,
};

/// `say`: inject a message through the gateway.
pub async fn say(args: SayArgs) -> Result<(), ServerError> {
    let room = args.target.resolve()?;
    let client = HttpGatewayClient::new(args.gateway_url);
    client
        .broadcast(room.as_str(), &args.message, &args.user, args.user_id.as_deref())
        .await?;
    tracing::info!("Message sent to '{}' via {}", room, client.base_url());
    Ok(())
}

/// `purge`: delete a room's history, then notify the relay best-effort.
pub async fn purge(args: PurgeArgs) -> Result<u64, ServerError> {
    let room = args.target.resolve()?;
    let repository = Arc::new(SqliteMessageRepository::connect(&args.database_url).await?);
    let notifier = Arc::new(HttpGatewayClient::new(args.gateway_url));

    let deleted = PurgeHistoryUseCase::new(repository.clone(), notifier)
        .execute(&room)
        .await?;
    repository.close().await;
    Ok(deleted)
}
