use serenity::all::{ChannelId, GuildId, Permissions, RoleId};

use crate::{
    error::{nation::NationError, AppError},
    model::{
        guild::GuildState,
        nation::{nation_label, NationEntry, GLOBAL_NATION},
    },
    platform::{allow_member, allow_role, deny_role, ChannelKind, NewChannel, NewRole},
    service::{
        config::ConfigService,
        nation::{NationService, Resources},
    },
};

/// Voice channels created in every nation category.
const VOICE_CHANNELS: [&str; 2] = ["players", "spectators"];

impl<'a> NationService<'a> {
    /// Creates a nation's role and channels and registers it in the guild.
    ///
    /// The role is hoisted and mentionable. The category is hidden from `@everyone`
    /// and visible to the bot, the nation role and the global role; it holds a text
    /// channel named after the nation and two voice channels. The config is saved and
    /// the admin channel notified afterwards.
    ///
    /// Once saved, members who already reacted to the welcome message with the
    /// nation's emoji get the role and the bot adds its own reaction. Both steps are
    /// best-effort.
    ///
    /// Runs under the nation's lock. If another task registered the nation while
    /// this one was waiting, the existing entry is returned and nothing is created.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to provision the nation in
    /// - `name` - Title-cased nation name
    ///
    /// # Returns
    /// - `Ok(NationEntry)` - The registered entry
    /// - `Err(NationError::UnknownNation)` - The name is not in the catalog
    /// - `Err(AppError::NotFound)` - The guild is not set up
    /// - `Err(AppError::DiscordErr)` - A platform call failed; created resources are logged
    pub async fn provision(&self, guild_id: GuildId, name: &str) -> Result<NationEntry, AppError> {
        let emoji = self
            .state
            .catalog
            .emoji(name)
            .ok_or_else(|| NationError::UnknownNation(name.to_string()))?
            .to_string();

        let _guard = self.state.nation_locks.acquire(guild_id, name).await;

        let guild = self.state.cache.get(guild_id).await?;
        if let Some(entry) = guild.nation(name) {
            return Ok(entry.clone());
        }

        let mut created = Resources::default();
        let (role, category) = match self
            .create_resources(&guild, name, &emoji, &mut created)
            .await
        {
            Ok(ids) => ids,
            Err(err) => {
                tracing::error!(
                    "Failed to provision nation {} in guild {}: {}. Orphaned resources: {}",
                    name,
                    guild_id,
                    err,
                    created
                );
                return Err(err);
            }
        };

        self.state
            .cache
            .update(guild_id, |guild| {
                guild.add_nation(name.to_string(), role, category, emoji.clone())
            })
            .await?;
        ConfigService::new(self.state).save().await?;

        self.seed_reaction(&guild, role, &emoji).await;

        let label = nation_label(&emoji, name);
        tracing::info!("Provisioned nation {} in guild {}", label, guild_id);
        self.notify_admins(&guild, &format!("ℹ️ Added **{}**", label))
            .await;

        Ok(NationEntry::Real {
            role,
            category,
            emoji,
        })
    }

    /// Creates the role, category and channels of a nation.
    ///
    /// Every created ID is recorded in `created` as soon as it exists.
    async fn create_resources(
        &self,
        guild: &GuildState,
        name: &str,
        emoji: &str,
        created: &mut Resources,
    ) -> Result<(RoleId, ChannelId), AppError> {
        let guild_id = guild.guild_id;
        let label = nation_label(emoji, name);

        let role = self
            .platform
            .create_role(
                guild_id,
                NewRole {
                    name: label.clone(),
                    hoist: true,
                    mentionable: true,
                },
            )
            .await?;
        created.role(role);

        let bot = self.platform.current_user_id().await?;
        let category = self
            .platform
            .create_channel(
                guild_id,
                NewChannel::new(label, ChannelKind::Category).overwrites(vec![
                    deny_role(guild_id.everyone_role(), Permissions::VIEW_CHANNEL),
                    allow_member(bot, Permissions::VIEW_CHANNEL),
                    allow_role(role, Permissions::VIEW_CHANNEL),
                    allow_role(guild.global_role, Permissions::VIEW_CHANNEL),
                ]),
            )
            .await?;
        created.channel(category);

        let text = self
            .platform
            .create_channel(
                guild_id,
                NewChannel::new(format!("{}│{}", emoji, name), ChannelKind::Text).parent(category),
            )
            .await?;
        created.channel(text);

        for voice_name in VOICE_CHANNELS {
            let voice = self
                .platform
                .create_channel(
                    guild_id,
                    NewChannel::new(voice_name, ChannelKind::Voice).parent(category),
                )
                .await?;
            created.channel(voice);
        }

        Ok((role, category))
    }

    /// Deletes a nation's role and channels and unregisters it.
    ///
    /// The role is deleted first, then every channel under the category, then the
    /// category itself. The config is saved and the admin channel notified
    /// afterwards. Runs under the nation's lock.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to remove the nation from
    /// - `name` - Title-cased nation name
    ///
    /// # Returns
    /// - `Ok(String)` - Label of the removed nation, e.g. `"🇫🇷 France"`
    /// - `Err(NationError::NotRegistered)` - The nation is Global or not registered
    /// - `Err(AppError::NotFound)` - The guild is not set up
    /// - `Err(AppError::DiscordErr)` - A platform call failed; deleted resources are logged
    pub async fn deprovision(&self, guild_id: GuildId, name: &str) -> Result<String, AppError> {
        if name == GLOBAL_NATION {
            return Err(NationError::NotRegistered(name.to_string()).into());
        }

        let _guard = self.state.nation_locks.acquire(guild_id, name).await;

        let guild = self.state.cache.get(guild_id).await?;
        let Some(NationEntry::Real {
            role,
            category,
            emoji,
        }) = guild.nation(name).cloned()
        else {
            return Err(NationError::NotRegistered(name.to_string()).into());
        };

        let mut deleted = Resources::default();
        if let Err(err) = self.delete_resources(guild_id, role, category, &mut deleted).await {
            tracing::error!(
                "Failed to remove nation {} from guild {}: {}. Already deleted: {}",
                name,
                guild_id,
                err,
                deleted
            );
            return Err(err);
        }

        self.state.cache.remove_nation(guild_id, name).await?;
        ConfigService::new(self.state).save().await?;

        if let Err(err) = self
            .platform
            .clear_reaction(guild.welcome_channel, guild.welcome_message, &emoji)
            .await
        {
            tracing::warn!(
                "Failed to clear {} reactions in guild {}: {}",
                emoji,
                guild_id,
                err
            );
        }

        let label = nation_label(&emoji, name);
        tracing::info!("Removed nation {} from guild {}", label, guild_id);
        self.notify_admins(&guild, &format!("ℹ️ Removed **{}**", label))
            .await;

        Ok(label)
    }

    /// Grants `role` to members already reacting with `emoji` on the welcome message,
    /// then adds the bot's own reaction. Failures are logged, never returned.
    async fn seed_reaction(&self, guild: &GuildState, role: RoleId, emoji: &str) {
        let guild_id = guild.guild_id;

        match self.backfill_reactors(guild, role, emoji).await {
            Ok(0) => {}
            Ok(count) => tracing::info!(
                "Granted {} role to {} earlier reactor(s) in guild {}",
                emoji,
                count,
                guild_id
            ),
            Err(err) => tracing::warn!(
                "Failed to grant {} role to earlier reactors in guild {}: {}",
                emoji,
                guild_id,
                err
            ),
        }

        if let Err(err) = self
            .platform
            .add_reaction(guild.welcome_channel, guild.welcome_message, emoji)
            .await
        {
            tracing::warn!(
                "Failed to add {} reaction in guild {}: {}",
                emoji,
                guild_id,
                err
            );
        }
    }

    async fn backfill_reactors(
        &self,
        guild: &GuildState,
        role: RoleId,
        emoji: &str,
    ) -> Result<usize, AppError> {
        let bot = self.platform.current_user_id().await?;
        let reactors = self
            .platform
            .reaction_users(guild.welcome_channel, guild.welcome_message, emoji)
            .await?;

        let mut granted = 0;
        for user_id in reactors.into_iter().filter(|user| *user != bot) {
            match self
                .platform
                .add_member_role(guild.guild_id, user_id, role)
                .await
            {
                Ok(()) => granted += 1,
                Err(err) => tracing::warn!(
                    "Failed to grant {} role to reactor {} in guild {}: {}",
                    emoji,
                    user_id,
                    guild.guild_id,
                    err
                ),
            }
        }

        Ok(granted)
    }

    async fn delete_resources(
        &self,
        guild_id: GuildId,
        role: RoleId,
        category: ChannelId,
        deleted: &mut Resources,
    ) -> Result<(), AppError> {
        self.platform.delete_role(guild_id, role).await?;
        deleted.role(role);

        for channel in self.platform.category_children(guild_id, category).await? {
            self.platform.delete_channel(channel).await?;
            deleted.channel(channel);
        }

        self.platform.delete_channel(category).await?;
        deleted.channel(category);

        Ok(())
    }

    /// Posts to the guild's admin channel. Failures are logged, never returned.
    pub(crate) async fn notify_admins(&self, guild: &GuildState, content: &str) {
        if let Err(err) = self
            .platform
            .send_message(guild.admin_notifications_channel, content)
            .await
        {
            tracing::warn!(
                "Failed to notify admins of guild {}: {}",
                guild.guild_id,
                err
            );
        }
    }
}
