//! Platform port for every Discord side effect.
//!
//! Services never call Serenity directly. They receive a `&dyn Platform` and go
//! through it to create roles and channels, send messages, change member roles and
//! rename members. The production adapter is [`discord::DiscordPlatform`], which wraps
//! the bot's shared HTTP client; tests use an in-memory adapter that records every
//! call.

pub mod discord;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, GuildId, MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions,
    RoleId, UserId,
};

use crate::{error::AppError, model::member::MemberProfile};

/// Role to be created in a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    /// Display members separately in the member list.
    pub hoist: bool,
    pub mentionable: bool,
}

/// Kind of a channel to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Category,
    Text,
    Voice,
}

/// Channel to be created in a guild.
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub name: String,
    pub kind: ChannelKind,
    /// Category to nest the channel under.
    pub parent: Option<ChannelId>,
    pub overwrites: Vec<PermissionOverwrite>,
}

impl NewChannel {
    pub fn new(name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            overwrites: Vec::new(),
        }
    }

    pub fn parent(mut self, category: ChannelId) -> Self {
        self.parent = Some(category);
        self
    }

    pub fn overwrites(mut self, overwrites: Vec<PermissionOverwrite>) -> Self {
        self.overwrites = overwrites;
        self
    }
}

/// Builds an overwrite granting `allow` to a role.
pub fn allow_role(role: RoleId, allow: Permissions) -> PermissionOverwrite {
    PermissionOverwrite {
        allow,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(role),
    }
}

/// Builds an overwrite denying `deny` to a role.
pub fn deny_role(role: RoleId, deny: Permissions) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::empty(),
        deny,
        kind: PermissionOverwriteType::Role(role),
    }
}

/// Builds an overwrite granting `allow` to a single member.
pub fn allow_member(user: UserId, allow: Permissions) -> PermissionOverwrite {
    PermissionOverwrite {
        allow,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Member(user),
    }
}

/// Access to the chat platform.
///
/// Every method maps to one platform call (or one paginated listing). Failures are
/// returned as [`AppError::DiscordErr`] and are never retried here.
#[async_trait]
pub trait Platform: Send + Sync {
    /// ID of the bot's own user.
    async fn current_user_id(&self) -> Result<UserId, AppError>;

    async fn create_role(&self, guild_id: GuildId, role: NewRole) -> Result<RoleId, AppError>;

    /// Deletes a role. A role that is already gone counts as deleted.
    async fn delete_role(&self, guild_id: GuildId, role_id: RoleId) -> Result<(), AppError>;

    /// IDs of every role of a guild.
    async fn role_ids(&self, guild_id: GuildId) -> Result<Vec<RoleId>, AppError>;

    async fn create_channel(
        &self,
        guild_id: GuildId,
        channel: NewChannel,
    ) -> Result<ChannelId, AppError>;

    /// Deletes a channel. A channel that is already gone counts as deleted.
    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError>;

    /// IDs of every channel of a guild, categories included.
    async fn channel_ids(&self, guild_id: GuildId) -> Result<Vec<ChannelId>, AppError>;

    /// Channels nested under a category.
    async fn category_children(
        &self,
        guild_id: GuildId,
        category_id: ChannelId,
    ) -> Result<Vec<ChannelId>, AppError>;

    async fn send_message(
        &self,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<MessageId, AppError>;

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<(), AppError>;

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError>;

    async fn message_exists(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<bool, AppError>;

    /// Reacts to a message as the bot.
    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError>;

    /// Removes every reaction with `emoji` from a message. Missing reactions are not an error.
    async fn clear_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError>;

    /// Users who reacted to a message with `emoji`.
    async fn reaction_users(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<Vec<UserId>, AppError>;

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberProfile, AppError>;

    /// Every member of a guild.
    async fn guild_members(&self, guild_id: GuildId) -> Result<Vec<MemberProfile>, AppError>;

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError>;

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError>;

    async fn set_nickname(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        nickname: &str,
    ) -> Result<(), AppError>;
}
