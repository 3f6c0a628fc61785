use serenity::all::{Context, Guild};

use crate::{
    platform::discord::DiscordPlatform, service::guild::GuildService, state::AppState,
};

/// Handles the guild_create event when a guild becomes available or the bot joins one.
///
/// Only guilds the bot has just joined and does not already know are bootstrapped.
/// Guilds becoming available at startup are loaded from the config file instead,
/// and quarantined guilds are never set up a second time.
pub async fn handle_guild_create(
    state: &AppState,
    ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    tracing::debug!(
        "Guild create event: {} ({}) - is_new: {:?}",
        guild.name,
        guild.id,
        is_new
    );

    if is_new != Some(true) || state.cache.knows(guild.id).await {
        return;
    }

    let platform = DiscordPlatform::new(ctx.http.clone());
    match GuildService::new(state, &platform).bootstrap(guild.id).await {
        Ok(_) => tracing::info!("Joined guild {} ({})", guild.name, guild.id),
        Err(e) => tracing::error!("Failed to set up guild {} ({}): {}", guild.name, guild.id, e),
    }
}
