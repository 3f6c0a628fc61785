use serenity::all::{Context, Reaction, ReactionType};

use crate::{
    platform::discord::DiscordPlatform, service::nation::NationService, state::AppState,
};

/// Handles a reaction added to or removed from a message.
///
/// Reactions on a guild's welcome message toggle the role of the nation whose emoji
/// was used. Custom emoji never match a nation and are ignored.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context
/// - `reaction` - The reaction event
/// - `added` - `true` for `reaction_add`, `false` for `reaction_remove`
pub async fn handle_reaction(state: &AppState, ctx: Context, reaction: Reaction, added: bool) {
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };
    let ReactionType::Unicode(emoji) = &reaction.emoji else {
        return;
    };

    let platform = DiscordPlatform::new(ctx.http.clone());

    if let Err(e) = NationService::new(state, &platform)
        .react(guild_id, user_id, reaction.message_id, emoji, added)
        .await
    {
        tracing::error!(
            "Failed to handle reaction {} of member {} in guild {}: {}",
            emoji,
            user_id,
            guild_id,
            e
        );
    }
}
