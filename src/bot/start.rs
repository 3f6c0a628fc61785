use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    bot::{command::CommandRegistry, handler::Handler},
    error::AppError,
    model::config::GuildConfigRecord,
    state::AppState,
};

/// Initializes the Discord bot client.
///
/// Builds the command registry, the event handler and the client, and returns the
/// client's HTTP handle so it can be shared with the nickname scheduler.
///
/// # Arguments
/// - `token` - Bot token used to log in
/// - `state` - Shared application state
/// - `guilds` - Persisted guild records, rehydrated on the first `ready` event
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its HTTP handle
/// - `Err(AppError::InternalError)` - The command registry is invalid
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn init_bot(
    token: &str,
    state: AppState,
    guilds: BTreeMap<u64, GuildConfigRecord>,
) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let registry = CommandRegistry::standard()?;
    let handler = Handler::new(state, registry, guilds);

    let client = Client::builder(token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Starts the Discord bot in a blocking manner
///
/// This should be called from within a tokio::spawn task since it will block until
/// the bot shuts down.
///
/// # Arguments
/// - `client` - Client built by [`init_bot`]
///
/// # Returns
/// - `Ok(())` - The bot shut down cleanly
/// - `Err(AppError)` - The gateway connection failed
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
