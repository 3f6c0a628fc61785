use serenity::all::{
    Context, EventHandler, Guild, GuildMemberUpdateEvent, Interaction, Member, Reaction, Ready,
};
use serenity::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::{bot::command::CommandRegistry, model::config::GuildConfigRecord, state::AppState};

pub mod guild;
pub mod interaction;
pub mod member;
pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
    pub registry: CommandRegistry,
    /// Persisted guild records, taken by the first `ready` event.
    ///
    /// Later `ready` events after a reconnect find `None` and skip rehydration.
    pending_guilds: Mutex<Option<BTreeMap<u64, GuildConfigRecord>>>,
}

impl Handler {
    pub fn new(
        state: AppState,
        registry: CommandRegistry,
        guilds: BTreeMap<u64, GuildConfigRecord>,
    ) -> Self {
        Self {
            state,
            registry,
            pending_guilds: Mutex::new(Some(guilds)),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        let pending = self.pending_guilds.lock().await.take();
        ready::handle_ready(&self.state, &self.registry, pending, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.state, ctx, guild, is_new).await;
    }

    /// Called for slash commands and autocomplete requests
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, &self.registry, ctx, interaction).await;
    }

    /// Called when a member is updated in a guild (roles, nickname, etc.)
    async fn guild_member_update(
        &self,
        ctx: Context,
        old: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        member::handle_guild_member_update(&self.state, ctx, old, new, event).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction(&self.state, ctx, reaction, true).await;
    }

    /// Called when a reaction is removed from a message
    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction(&self.state, ctx, reaction, false).await;
    }
}
