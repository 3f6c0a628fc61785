use serenity::all::{GuildId, MessageId, UserId};

use crate::{
    error::{nation::NationError, AppError},
    model::nation::{nation_label, title_case, NationEntry, GLOBAL_NATION, GLOBAL_NATION_EMOJI},
    service::nation::NationService,
};

/// Outcome of toggling the global role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalToggle {
    Joined,
    Left,
}

impl<'a> NationService<'a> {
    /// Grants a member the role of a nation, provisioning the nation on first use.
    ///
    /// Members may hold any number of nations at once; `"Global"` grants the global
    /// role. Whether the member already holds the role is decided from their live
    /// role list before anything is changed.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member belongs to
    /// - `user_id` - Member to update
    /// - `name` - Nation name as typed; title-cased before lookup
    ///
    /// # Returns
    /// - `Ok(String)` - Label of the joined nation, e.g. `"🇫🇷 France"`
    /// - `Err(NationError::UnknownNation)` - The name is neither Global nor in the catalog
    /// - `Err(NationError::AlreadyMember)` - The member already holds the nation's role
    pub async fn join(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        name: &str,
    ) -> Result<String, AppError> {
        let name = title_case(name);
        let entry = self
            .resolve(guild_id, &name, true)
            .await?
            .ok_or_else(|| NationError::UnknownNation(name.clone()))?;
        let label = nation_label(entry.emoji(), &name);

        let member = self.platform.member(guild_id, user_id).await?;
        if member.has_role(entry.role()) {
            return Err(NationError::AlreadyMember(label).into());
        }

        self.platform
            .add_member_role(guild_id, user_id, entry.role())
            .await?;

        tracing::info!("Member {} joined {} in guild {}", user_id, label, guild_id);

        Ok(label)
    }

    /// Revokes a member's nation role. Never provisions anything.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member belongs to
    /// - `user_id` - Member to update
    /// - `name` - Nation name as typed; title-cased before lookup
    ///
    /// # Returns
    /// - `Ok(String)` - Label of the left nation
    /// - `Err(NationError::UnknownNation)` - The name is neither Global nor in the catalog
    /// - `Err(NationError::NotAMember)` - The nation is unregistered or the member lacks its role
    pub async fn leave(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        name: &str,
    ) -> Result<String, AppError> {
        let name = title_case(name);
        let Some(entry) = self.resolve(guild_id, &name, false).await? else {
            return Err(match self.state.catalog.emoji(&name) {
                Some(emoji) => NationError::NotAMember(nation_label(emoji, &name)),
                None => NationError::UnknownNation(name),
            }
            .into());
        };
        let label = nation_label(entry.emoji(), &name);

        let member = self.platform.member(guild_id, user_id).await?;
        if !member.has_role(entry.role()) {
            return Err(NationError::NotAMember(label).into());
        }

        self.platform
            .remove_member_role(guild_id, user_id, entry.role())
            .await?;

        tracing::info!("Member {} left {} in guild {}", user_id, label, guild_id);

        Ok(label)
    }

    /// Grants the global role if the member lacks it, revokes it otherwise.
    ///
    /// Independent of the member's nation roles.
    ///
    /// # Returns
    /// - `Ok(GlobalToggle)` - Whether the member joined or left Global
    /// - `Err(AppError::NotFound)` - The guild is not set up
    pub async fn toggle_global(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<GlobalToggle, AppError> {
        let guild = self.state.cache.get(guild_id).await?;
        let member = self.platform.member(guild_id, user_id).await?;

        let outcome = if member.has_role(guild.global_role) {
            self.platform
                .remove_member_role(guild_id, user_id, guild.global_role)
                .await?;
            GlobalToggle::Left
        } else {
            self.platform
                .add_member_role(guild_id, user_id, guild.global_role)
                .await?;
            GlobalToggle::Joined
        };

        tracing::info!(
            "Member {} toggled {} in guild {}: {:?}",
            user_id,
            GLOBAL_NATION,
            guild_id,
            outcome
        );

        Ok(outcome)
    }

    /// Applies a reaction on a guild's welcome message.
    ///
    /// Reacting with a registered nation's emoji grants its role and removing the
    /// reaction revokes it; the Global emoji maps to the global role. Reactions on
    /// other messages, by the bot itself or with unknown emojis are ignored, and
    /// reactions never provision a nation.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the reaction happened in
    /// - `user_id` - Member who reacted
    /// - `message_id` - Message that was reacted to
    /// - `emoji` - Unicode emoji of the reaction
    /// - `added` - `true` for a new reaction, `false` for a removed one
    ///
    /// # Returns
    /// - `Ok(true)` - A role was granted or revoked
    /// - `Ok(false)` - The reaction was ignored
    pub async fn react(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        message_id: MessageId,
        emoji: &str,
        added: bool,
    ) -> Result<bool, AppError> {
        let Some(guild) = self.state.cache.find(guild_id).await else {
            return Ok(false);
        };
        if message_id != guild.welcome_message {
            return Ok(false);
        }
        if user_id == self.platform.current_user_id().await? {
            return Ok(false);
        }

        let (name, entry): (&str, NationEntry) = if emoji == GLOBAL_NATION_EMOJI {
            (GLOBAL_NATION, guild.global_entry())
        } else {
            match guild.nation_by_emoji(emoji) {
                Some((name, entry)) => (name, entry.clone()),
                None => return Ok(false),
            }
        };

        if added {
            self.platform
                .add_member_role(guild_id, user_id, entry.role())
                .await?;
        } else {
            self.platform
                .remove_member_role(guild_id, user_id, entry.role())
                .await?;
        }

        tracing::info!(
            "Member {} {} {} by reaction in guild {}",
            user_id,
            if added { "joined" } else { "left" },
            name,
            guild_id
        );

        Ok(true)
    }
}
