//! Guild bootstrap, startup rehydration and welcome message management.

use serenity::all::{ChannelId, GuildId, MessageId, Permissions, RoleId};
use std::collections::{BTreeMap, HashSet};

use crate::{
    error::{config::ConfigError, AppError},
    model::{
        config::GuildConfigRecord,
        guild::GuildState,
        nation::{nation_label, GLOBAL_NATION, GLOBAL_NATION_EMOJI},
    },
    platform::{allow_member, deny_role, ChannelKind, NewChannel, NewRole, Platform},
    service::config::ConfigService,
    state::AppState,
};

/// Name of the private channel receiving lifecycle notifications.
pub const ADMIN_CHANNEL_NAME: &str = "🤖│nation-wars-bot";

/// Name of the read-only channel holding the welcome message.
pub const WELCOME_CHANNEL_NAME: &str = "🚩│join-nation";

/// Default content of the welcome message.
pub fn welcome_text() -> String {
    format!(
        "## Hello, I'm the Nation Wars bot! 🤖\n\
         - **Join your nation** by typing **`/nation join`** and searching for your nation's name in English. \
         I will give you **your nation's role** and access to **your nation's channels** 🚀\n\
         - Optionally, join the special **{}** nation to get access to **all nations' channels** \
         without grabbing the roles.",
        nation_label(GLOBAL_NATION_EMOJI, GLOBAL_NATION)
    )
}

pub struct GuildService<'a> {
    state: &'a AppState,
    platform: &'a dyn Platform,
}

impl<'a> GuildService<'a> {
    pub fn new(state: &'a AppState, platform: &'a dyn Platform) -> Self {
        Self { state, platform }
    }

    /// Sets up a guild the bot has just joined.
    ///
    /// Creates the global role, an admin channel only the bot can see, and a welcome
    /// channel only the bot can post in, then posts the welcome message, caches the
    /// guild and saves the config.
    ///
    /// # Returns
    /// - `Ok(GuildState)` - The new guild state, without nations
    /// - `Err(AppError::DiscordErr)` - A platform call failed; created resources are logged
    pub async fn bootstrap(&self, guild_id: GuildId) -> Result<GuildState, AppError> {
        let mut created: Vec<String> = Vec::new();

        let state = match self.create_guild_resources(guild_id, &mut created).await {
            Ok(state) => state,
            Err(err) => {
                tracing::error!(
                    "Failed to set up guild {}: {}. Orphaned resources: [{}]",
                    guild_id,
                    err,
                    created.join(", ")
                );
                return Err(err);
            }
        };

        self.state.cache.insert(state.clone()).await;
        ConfigService::new(self.state).save().await?;

        tracing::info!("Set up guild {}", guild_id);

        Ok(state)
    }

    async fn create_guild_resources(
        &self,
        guild_id: GuildId,
        created: &mut Vec<String>,
    ) -> Result<GuildState, AppError> {
        let everyone = guild_id.everyone_role();
        let bot = self.platform.current_user_id().await?;

        let global_role = self
            .platform
            .create_role(
                guild_id,
                NewRole {
                    name: nation_label(GLOBAL_NATION_EMOJI, GLOBAL_NATION),
                    hoist: false,
                    mentionable: false,
                },
            )
            .await?;
        created.push(format!("role {}", global_role));

        let admin_channel = self
            .platform
            .create_channel(
                guild_id,
                NewChannel::new(ADMIN_CHANNEL_NAME, ChannelKind::Text).overwrites(vec![
                    deny_role(everyone, Permissions::VIEW_CHANNEL),
                    allow_member(bot, Permissions::VIEW_CHANNEL),
                ]),
            )
            .await?;
        created.push(format!("channel {}", admin_channel));

        let welcome_channel = self
            .platform
            .create_channel(
                guild_id,
                NewChannel::new(WELCOME_CHANNEL_NAME, ChannelKind::Text).overwrites(vec![
                    deny_role(everyone, Permissions::SEND_MESSAGES),
                    allow_member(bot, Permissions::SEND_MESSAGES),
                ]),
            )
            .await?;
        created.push(format!("channel {}", welcome_channel));

        let welcome_message = self
            .platform
            .send_message(welcome_channel, &welcome_text())
            .await?;

        Ok(GuildState::new(
            guild_id,
            global_role,
            admin_channel,
            welcome_channel,
            welcome_message,
        ))
    }

    /// Restores every persisted guild into the cache.
    ///
    /// Each referenced role, channel and message is checked against the platform. A
    /// guild with a reference that no longer resolves, or whose check fails, is not
    /// loaded: the failure is logged and its record is quarantined so that later
    /// saves keep it unchanged.
    ///
    /// # Arguments
    /// - `records` - Persisted guild records keyed by guild ID
    ///
    /// # Returns
    /// - `usize` - Number of guilds loaded
    pub async fn rehydrate(&self, records: BTreeMap<u64, GuildConfigRecord>) -> usize {
        let mut loaded = 0;

        for (guild_id, record) in records {
            match self.rehydrate_guild(guild_id, &record).await {
                Ok(state) => {
                    tracing::info!(
                        "Loaded guild {} with {} nation(s)",
                        guild_id,
                        state.nation_count()
                    );
                    self.state.cache.insert(state).await;
                    loaded += 1;
                }
                Err(err) => {
                    tracing::error!("Failed to load guild {}: {}", guild_id, err);
                    self.state.cache.quarantine(guild_id, record).await;
                }
            }
        }

        loaded
    }

    async fn rehydrate_guild(
        &self,
        guild_id: u64,
        record: &GuildConfigRecord,
    ) -> Result<GuildState, AppError> {
        let state = GuildState::from_record(guild_id, record)?;
        let guild = state.guild_id;

        let missing = |what: String| -> AppError {
            ConfigError::InvalidRecord {
                guild_id,
                field: format!("{} (no longer exists)", what),
            }
            .into()
        };

        let roles: HashSet<RoleId> = self.platform.role_ids(guild).await?.into_iter().collect();
        let channels: HashSet<ChannelId> =
            self.platform.channel_ids(guild).await?.into_iter().collect();

        if !roles.contains(&state.global_role) {
            return Err(missing("global_role_id".to_string()));
        }
        if !channels.contains(&state.admin_notifications_channel) {
            return Err(missing("admin_notifications_channel_id".to_string()));
        }
        if !channels.contains(&state.welcome_channel) {
            return Err(missing("welcome_channel_id".to_string()));
        }
        if !self
            .platform
            .message_exists(state.welcome_channel, state.welcome_message)
            .await?
        {
            return Err(missing("welcome_message_id".to_string()));
        }

        for (name, entry) in state.nations() {
            if !roles.contains(&entry.role()) {
                return Err(missing(format!("role_id of {}", name)));
            }
            if let Some(category) = entry.category() {
                if !channels.contains(&category) {
                    return Err(missing(format!("category_id of {}", name)));
                }
            }
            if self.state.catalog.emoji(name).is_none() {
                tracing::warn!(
                    "Guild {} has nation {} which is no longer in the catalog",
                    guild_id,
                    name
                );
            }
        }

        Ok(state)
    }

    /// Posts a fresh welcome message and forgets the previous one.
    ///
    /// The previous message is deleted on a best-effort basis.
    ///
    /// # Returns
    /// - `Ok(String)` - Link to the new welcome message
    /// - `Err(AppError::NotFound)` - The guild is not set up
    pub async fn reset_welcome(&self, guild_id: GuildId) -> Result<String, AppError> {
        let guild = self.state.cache.get(guild_id).await?;

        let message = self
            .platform
            .send_message(guild.welcome_channel, &welcome_text())
            .await?;

        if let Err(err) = self
            .platform
            .delete_message(guild.welcome_channel, guild.welcome_message)
            .await
        {
            tracing::warn!(
                "Failed to delete previous welcome message {} in guild {}: {}",
                guild.welcome_message,
                guild_id,
                err
            );
        }

        self.set_welcome_message(guild_id, message).await?;

        Ok(message.link(guild.welcome_channel, Some(guild_id)))
    }

    /// Adopts an existing message of the welcome channel as the welcome message.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to update
    /// - `message_id` - Message ID as typed by the admin
    ///
    /// # Returns
    /// - `Ok(String)` - Link to the adopted message
    /// - `Err(AppError::BadRequest)` - The ID is malformed or no such message is in the welcome channel
    pub async fn replace_welcome(
        &self,
        guild_id: GuildId,
        message_id: &str,
    ) -> Result<String, AppError> {
        let guild = self.state.cache.get(guild_id).await?;

        let message = message_id
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .map(MessageId::new)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid message ID `{}`", message_id)))?;

        if !self
            .platform
            .message_exists(guild.welcome_channel, message)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "Message {} was not found in <#{}>",
                message, guild.welcome_channel
            )));
        }

        self.set_welcome_message(guild_id, message).await?;

        Ok(message.link(guild.welcome_channel, Some(guild_id)))
    }

    /// Replaces the content of the welcome message with three lines.
    ///
    /// # Returns
    /// - `Ok(String)` - Link to the edited message
    /// - `Err(AppError::NotFound)` - The guild is not set up
    pub async fn edit_welcome(&self, guild_id: GuildId, lines: [&str; 3]) -> Result<String, AppError> {
        let guild = self.state.cache.get(guild_id).await?;

        self.platform
            .edit_message(guild.welcome_channel, guild.welcome_message, &lines.join("\n"))
            .await?;

        tracing::info!("Edited welcome message of guild {}", guild_id);

        Ok(guild
            .welcome_message
            .link(guild.welcome_channel, Some(guild_id)))
    }

    async fn set_welcome_message(&self, guild_id: GuildId, message: MessageId) -> Result<(), AppError> {
        self.state
            .cache
            .update(guild_id, |guild| guild.welcome_message = message)
            .await?;
        ConfigService::new(self.state).save().await?;

        tracing::info!("Welcome message of guild {} is now {}", guild_id, message);

        Ok(())
    }
}
