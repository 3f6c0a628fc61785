//! In-memory platform for service tests.

use async_trait::async_trait;
use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::{
    error::AppError,
    model::member::MemberProfile,
    platform::{NewChannel, NewRole, Platform},
};

/// ID of the bot's own user on the in-memory platform.
pub const BOT_USER_ID: u64 = 999;

/// Thread-safe in-memory platform recording every side effect.
#[derive(Clone, Default)]
pub struct InMemoryPlatform {
    state: Arc<Mutex<InMemoryPlatformState>>,
}

#[derive(Default)]
struct InMemoryPlatformState {
    next_id: u64,
    roles: BTreeMap<RoleId, (GuildId, NewRole)>,
    channels: BTreeMap<ChannelId, (GuildId, NewChannel)>,
    messages: BTreeMap<MessageId, (ChannelId, String)>,
    reactions: BTreeMap<(MessageId, String), Vec<UserId>>,
    members: BTreeMap<(GuildId, UserId), MemberProfile>,
    renames: Vec<(UserId, String)>,
    calls: Vec<&'static str>,
    failing: HashSet<&'static str>,
    protected: HashSet<UserId>,
}

impl InMemoryPlatformState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    fn call(&mut self, op: &'static str) -> Result<(), AppError> {
        self.calls.push(op);
        if self.failing.contains(op) {
            return Err(serenity::Error::Other("simulated platform failure").into());
        }
        Ok(())
    }
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryPlatformState> {
        self.state.lock().unwrap()
    }

    /// Makes every later call of `op` fail with a platform error.
    pub fn fail_on(&self, op: &'static str) {
        self.lock().failing.insert(op);
    }

    /// Makes renaming `user_id` fail, as for a guild owner.
    pub fn protect_member(&self, user_id: UserId) {
        self.lock().protected.insert(user_id);
    }

    pub fn add_member(&self, guild_id: GuildId, profile: MemberProfile) {
        self.lock().members.insert((guild_id, profile.user_id), profile);
    }

    pub fn member_profile(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberProfile> {
        self.lock().members.get(&(guild_id, user_id)).cloned()
    }

    pub fn seed_role(&self, guild_id: GuildId, name: &str) -> RoleId {
        let mut state = self.lock();
        let id = RoleId::new(state.next_id());
        state.roles.insert(
            id,
            (
                guild_id,
                NewRole {
                    name: name.to_string(),
                    hoist: false,
                    mentionable: false,
                },
            ),
        );
        id
    }

    pub fn seed_channel(&self, guild_id: GuildId, channel: NewChannel) -> ChannelId {
        let mut state = self.lock();
        let id = ChannelId::new(state.next_id());
        state.channels.insert(id, (guild_id, channel));
        id
    }

    pub fn seed_message(&self, channel_id: ChannelId, content: &str) -> MessageId {
        let mut state = self.lock();
        let id = MessageId::new(state.next_id());
        state.messages.insert(id, (channel_id, content.to_string()));
        id
    }

    pub fn role(&self, role_id: RoleId) -> Option<NewRole> {
        self.lock().roles.get(&role_id).map(|(_, role)| role.clone())
    }

    pub fn channel(&self, channel_id: ChannelId) -> Option<NewChannel> {
        self.lock()
            .channels
            .get(&channel_id)
            .map(|(_, channel)| channel.clone())
    }

    /// Channels nested under a category, in creation order.
    pub fn category_children_of(&self, category_id: ChannelId) -> Vec<NewChannel> {
        self.lock()
            .channels
            .values()
            .filter(|(_, channel)| channel.parent == Some(category_id))
            .map(|(_, channel)| channel.clone())
            .collect()
    }

    pub fn channel_count(&self) -> usize {
        self.lock().channels.len()
    }

    pub fn role_count(&self) -> usize {
        self.lock().roles.len()
    }

    pub fn message(&self, message_id: MessageId) -> Option<String> {
        self.lock()
            .messages
            .get(&message_id)
            .map(|(_, content)| content.clone())
    }

    /// Contents of every message in a channel, oldest first.
    pub fn messages_in(&self, channel_id: ChannelId) -> Vec<String> {
        self.lock()
            .messages
            .values()
            .filter(|(channel, _)| *channel == channel_id)
            .map(|(_, content)| content.clone())
            .collect()
    }

    /// Successful renames, in call order.
    pub fn renames(&self) -> Vec<(UserId, String)> {
        self.lock().renames.clone()
    }

    /// Names of every platform call made so far, including failed ones.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    /// Records a reaction by `user_id`, as if a member had clicked it.
    pub fn seed_reaction(&self, message_id: MessageId, emoji: &str, user_id: UserId) {
        let mut state = self.lock();
        let users = state
            .reactions
            .entry((message_id, emoji.to_string()))
            .or_default();
        if !users.contains(&user_id) {
            users.push(user_id);
        }
    }

    /// Users who reacted to a message with `emoji`, in reaction order.
    pub fn reactors(&self, message_id: MessageId, emoji: &str) -> Vec<UserId> {
        self.lock()
            .reactions
            .get(&(message_id, emoji.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn remove_role(&self, role_id: RoleId) {
        self.lock().roles.remove(&role_id);
    }
}

#[async_trait]
impl Platform for InMemoryPlatform {
    async fn current_user_id(&self) -> Result<UserId, AppError> {
        Ok(UserId::new(BOT_USER_ID))
    }

    async fn create_role(&self, guild_id: GuildId, role: NewRole) -> Result<RoleId, AppError> {
        let mut state = self.lock();
        state.call("create_role")?;
        let id = RoleId::new(state.next_id());
        state.roles.insert(id, (guild_id, role));
        Ok(id)
    }

    async fn delete_role(&self, _guild_id: GuildId, role_id: RoleId) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("delete_role")?;
        state.roles.remove(&role_id);
        for member in state.members.values_mut() {
            member.roles.retain(|role| *role != role_id);
        }
        Ok(())
    }

    async fn role_ids(&self, guild_id: GuildId) -> Result<Vec<RoleId>, AppError> {
        let mut state = self.lock();
        state.call("role_ids")?;
        Ok(state
            .roles
            .iter()
            .filter(|(_, (guild, _))| *guild == guild_id)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn create_channel(
        &self,
        guild_id: GuildId,
        channel: NewChannel,
    ) -> Result<ChannelId, AppError> {
        let mut state = self.lock();
        state.call("create_channel")?;
        let id = ChannelId::new(state.next_id());
        state.channels.insert(id, (guild_id, channel));
        Ok(id)
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("delete_channel")?;
        state.channels.remove(&channel_id);
        Ok(())
    }

    async fn channel_ids(&self, guild_id: GuildId) -> Result<Vec<ChannelId>, AppError> {
        let mut state = self.lock();
        state.call("channel_ids")?;
        Ok(state
            .channels
            .iter()
            .filter(|(_, (guild, _))| *guild == guild_id)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn category_children(
        &self,
        guild_id: GuildId,
        category_id: ChannelId,
    ) -> Result<Vec<ChannelId>, AppError> {
        let mut state = self.lock();
        state.call("category_children")?;
        Ok(state
            .channels
            .iter()
            .filter(|(_, (guild, channel))| {
                *guild == guild_id && channel.parent == Some(category_id)
            })
            .map(|(id, _)| *id)
            .collect())
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<MessageId, AppError> {
        let mut state = self.lock();
        state.call("send_message")?;
        let id = MessageId::new(state.next_id());
        state.messages.insert(id, (channel_id, content.to_string()));
        Ok(id)
    }

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("edit_message")?;
        match state.messages.get_mut(&message_id) {
            Some((channel, existing)) if *channel == channel_id => {
                *existing = content.to_string();
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("Unknown message {}", message_id))),
        }
    }

    async fn delete_message(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("delete_message")?;
        state.messages.remove(&message_id);
        Ok(())
    }

    async fn message_exists(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<bool, AppError> {
        let mut state = self.lock();
        state.call("message_exists")?;
        Ok(matches!(state.messages.get(&message_id), Some((channel, _)) if *channel == channel_id))
    }

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("add_reaction")?;
        if !matches!(state.messages.get(&message_id), Some((channel, _)) if *channel == channel_id) {
            return Err(AppError::NotFound(format!("Unknown message {}", message_id)));
        }
        let bot = UserId::new(BOT_USER_ID);
        let users = state
            .reactions
            .entry((message_id, emoji.to_string()))
            .or_default();
        if !users.contains(&bot) {
            users.push(bot);
        }
        Ok(())
    }

    async fn clear_reaction(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("clear_reaction")?;
        state.reactions.remove(&(message_id, emoji.to_string()));
        Ok(())
    }

    async fn reaction_users(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<Vec<UserId>, AppError> {
        let mut state = self.lock();
        state.call("reaction_users")?;
        Ok(state
            .reactions
            .get(&(message_id, emoji.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberProfile, AppError> {
        let mut state = self.lock();
        state.call("member")?;
        state
            .members
            .get(&(guild_id, user_id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Unknown member {}", user_id)))
    }

    async fn guild_members(&self, guild_id: GuildId) -> Result<Vec<MemberProfile>, AppError> {
        let mut state = self.lock();
        state.call("guild_members")?;
        Ok(state
            .members
            .iter()
            .filter(|((guild, _), _)| *guild == guild_id)
            .map(|(_, profile)| profile.clone())
            .collect())
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("add_member_role")?;
        let member = state
            .members
            .get_mut(&(guild_id, user_id))
            .ok_or_else(|| AppError::NotFound(format!("Unknown member {}", user_id)))?;
        if !member.roles.contains(&role_id) {
            member.roles.push(role_id);
        }
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("remove_member_role")?;
        let member = state
            .members
            .get_mut(&(guild_id, user_id))
            .ok_or_else(|| AppError::NotFound(format!("Unknown member {}", user_id)))?;
        member.roles.retain(|role| *role != role_id);
        Ok(())
    }

    async fn set_nickname(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        nickname: &str,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        state.call("set_nickname")?;
        if state.protected.contains(&user_id) {
            return Err(serenity::Error::Other("Missing Permissions").into());
        }
        if let Some(member) = state.members.get_mut(&(guild_id, user_id)) {
            member.nick = Some(nickname.to_string());
        }
        state.renames.push((user_id, nickname.to_string()));
        Ok(())
    }
}
