use serenity::all::{Context, GuildMemberUpdateEvent, Member};

use crate::{
    model::member::MemberProfile,
    platform::discord::DiscordPlatform,
    service::nickname::{NicknameService, SyncMode},
    state::AppState,
};

/// Handles the guild_member_update event when a member's roles or nickname change.
///
/// Rewrites the member's nickname so that its prefix matches the nation they hold.
/// Other bots are renamed like any member, matching the periodic sweep; only the bot
/// itself is skipped. A rename fires this event again for the same member, and the
/// hook then finds the nickname already correct and stops.
pub async fn handle_guild_member_update(
    state: &AppState,
    ctx: Context,
    _old: Option<Member>,
    _new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    let bot_id = ctx.cache.current_user().id;
    if event.user.id == bot_id {
        return;
    }

    let platform = DiscordPlatform::new(ctx.http.clone());
    let profile = MemberProfile::from(&event);

    match NicknameService::new(state, &platform)
        .sync_member(event.guild_id, &profile, SyncMode::Hook)
        .await
    {
        Ok(true) => tracing::debug!(
            "Updated nickname of member {} in guild {}",
            event.user.id,
            event.guild_id
        ),
        Ok(false) => {}
        Err(e) => tracing::error!(
            "Failed to sync nickname of member {} in guild {}: {}",
            event.user.id,
            event.guild_id,
            e
        ),
    }
}
