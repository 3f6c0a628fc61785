use async_trait::async_trait;
use serenity::all::{
    ChannelId, ChannelType, CreateChannel, CreateMessage, EditMember, EditMessage, EditRole,
    GuildId, MessageId, ReactionType, RoleId, UserId,
};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    error::AppError,
    model::member::MemberProfile,
    platform::{ChannelKind, NewChannel, NewRole, Platform},
};

/// Maximum number of members to fetch per API request.
///
/// Discord's API supports up to 1000 members per request. Using the maximum
/// reduces the number of API calls needed for large guilds.
static MEMBERS_PER_REQUEST: u64 = 1000;

/// Maximum number of users Discord returns per reaction listing request.
static REACTION_USERS_PER_REQUEST: u8 = 100;

/// Audit log reason attached to member role changes.
const AUDIT_REASON: &str = "Nation Wars bot";

/// Platform adapter backed by Serenity's HTTP client.
///
/// Cheap to clone; every clone shares the same HTTP client and rate limiter.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Whether a Serenity error is a 404 from the REST API.
fn is_not_found(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http_err) => {
            http_err.status_code().map(|status| status.as_u16()) == Some(404)
        }
        _ => false,
    }
}

/// Maps a 404 to success, for deletions of objects that may already be gone.
fn ignore_not_found(result: Result<(), serenity::Error>) -> Result<(), AppError> {
    match result {
        Err(e) if !is_not_found(&e) => Err(e.into()),
        _ => Ok(()),
    }
}

fn unicode(emoji: &str) -> ReactionType {
    ReactionType::Unicode(emoji.to_string())
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn current_user_id(&self) -> Result<UserId, AppError> {
        let user = self.http.get_current_user().await?;
        Ok(user.id)
    }

    async fn create_role(&self, guild_id: GuildId, role: NewRole) -> Result<RoleId, AppError> {
        let builder = EditRole::new()
            .name(role.name)
            .hoist(role.hoist)
            .mentionable(role.mentionable);

        let created = guild_id.create_role(&self.http, builder).await?;

        tracing::debug!("Created role {} ({}) in guild {}", created.name, created.id, guild_id);

        Ok(created.id)
    }

    async fn delete_role(&self, guild_id: GuildId, role_id: RoleId) -> Result<(), AppError> {
        ignore_not_found(guild_id.delete_role(&self.http, role_id).await)
    }

    async fn role_ids(&self, guild_id: GuildId) -> Result<Vec<RoleId>, AppError> {
        let roles = guild_id.roles(&self.http).await?;
        Ok(roles.into_keys().collect())
    }

    async fn create_channel(
        &self,
        guild_id: GuildId,
        channel: NewChannel,
    ) -> Result<ChannelId, AppError> {
        let kind = match channel.kind {
            ChannelKind::Category => ChannelType::Category,
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Voice => ChannelType::Voice,
        };

        let mut builder = CreateChannel::new(channel.name)
            .kind(kind)
            .permissions(channel.overwrites);
        if let Some(parent) = channel.parent {
            builder = builder.category(parent);
        }

        let created = guild_id.create_channel(&self.http, builder).await?;

        tracing::debug!(
            "Created channel {} ({}) in guild {}",
            created.name,
            created.id,
            guild_id
        );

        Ok(created.id)
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        ignore_not_found(channel_id.delete(&self.http).await.map(|_| ()))
    }

    async fn channel_ids(&self, guild_id: GuildId) -> Result<Vec<ChannelId>, AppError> {
        let channels = guild_id.channels(&self.http).await?;
        Ok(channels.into_keys().collect())
    }

    async fn category_children(
        &self,
        guild_id: GuildId,
        category_id: ChannelId,
    ) -> Result<Vec<ChannelId>, AppError> {
        let channels = guild_id.channels(&self.http).await?;

        Ok(channels
            .values()
            .filter(|channel| channel.parent_id == Some(category_id))
            .map(|channel| channel.id)
            .collect())
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<MessageId, AppError> {
        let message = CreateMessage::new().content(content);
        let sent = channel_id.send_message(&self.http, message).await?;
        Ok(sent.id)
    }

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<(), AppError> {
        let edit_builder = EditMessage::new().content(content);
        self.http
            .edit_message(channel_id, message_id, &edit_builder, vec![])
            .await?;
        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError> {
        self.http
            .delete_message(channel_id, message_id, None)
            .await?;
        Ok(())
    }

    async fn message_exists(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<bool, AppError> {
        match self.http.get_message(channel_id, message_id).await {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.http
            .create_reaction(channel_id, message_id, &unicode(emoji))
            .await?;
        Ok(())
    }

    async fn clear_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError> {
        ignore_not_found(
            self.http
                .delete_message_reaction_emoji(channel_id, message_id, &unicode(emoji))
                .await,
        )
    }

    async fn reaction_users(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<Vec<UserId>, AppError> {
        let reaction = unicode(emoji);
        let mut all_users = Vec::new();
        let mut after: Option<u64> = None;

        loop {
            let users = self
                .http
                .get_reaction_users(
                    channel_id,
                    message_id,
                    &reaction,
                    REACTION_USERS_PER_REQUEST,
                    after,
                )
                .await?;

            if users.is_empty() {
                break;
            }

            after = users.last().map(|u| u.id.get());

            let fetched_count = users.len();
            all_users.extend(users.iter().map(|u| u.id));

            if fetched_count < REACTION_USERS_PER_REQUEST as usize {
                break;
            }
        }

        Ok(all_users)
    }

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberProfile, AppError> {
        let member = self.http.get_member(guild_id, user_id).await?;
        Ok(MemberProfile::from(&member))
    }

    async fn guild_members(&self, guild_id: GuildId) -> Result<Vec<MemberProfile>, AppError> {
        let mut all_members = Vec::new();
        let mut after: Option<u64> = None;

        loop {
            let members = self
                .http
                .get_guild_members(guild_id, Some(MEMBERS_PER_REQUEST), after)
                .await?;

            if members.is_empty() {
                break;
            }

            // Set up pagination for next iteration
            after = members.last().map(|m| m.user.id.get());

            let fetched_count = members.len();
            all_members.extend(members.iter().map(MemberProfile::from));

            // If we got less than the maximum, we've reached the end
            if fetched_count < MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        tracing::trace!(
            "Fetched total of {} members for guild {}",
            all_members.len(),
            guild_id
        );

        Ok(all_members)
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some(AUDIT_REASON))
            .await?;
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, Some(AUDIT_REASON))
            .await?;
        Ok(())
    }

    async fn set_nickname(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        nickname: &str,
    ) -> Result<(), AppError> {
        guild_id
            .edit_member(&self.http, user_id, EditMember::new().nickname(nickname))
            .await?;
        Ok(())
    }
}
