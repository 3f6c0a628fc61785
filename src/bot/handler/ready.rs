//! Ready event handler for bot initialization.
//!
//! The `ready` event fires after the bot connects to Discord's gateway and
//! completes the initial handshake. It is used to:
//! - Set the bot's activity
//! - Register the slash commands globally
//! - Rehydrate the guilds stored in the config file, once per process

use serenity::all::{ActivityData, Command, Context, Ready};
use std::collections::BTreeMap;

use crate::{
    bot::command::CommandRegistry,
    model::config::GuildConfigRecord,
    platform::discord::DiscordPlatform,
    service::guild::GuildService,
    state::AppState,
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared application state
/// - `registry` - Commands to register with Discord
/// - `pending` - Persisted guild records; `None` after the first `ready` event
/// - `ctx` - Discord context
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(
    state: &AppState,
    registry: &CommandRegistry,
    pending: Option<BTreeMap<u64, GuildConfigRecord>>,
    ctx: Context,
    ready: Ready,
) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::custom("⚔️ /nation join")));

    match Command::set_global_commands(&ctx.http, registry.create_commands()).await {
        Ok(commands) => tracing::info!("Registered {} slash command(s)", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }

    let Some(records) = pending else {
        tracing::debug!("Reconnected; guilds already loaded");
        return;
    };

    let total = records.len();
    let platform = DiscordPlatform::new(ctx.http.clone());
    let loaded = GuildService::new(state, &platform).rehydrate(records).await;

    tracing::info!("Loaded {} of {} configured guild(s)", loaded, total);
}
