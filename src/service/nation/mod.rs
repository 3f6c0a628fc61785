//! Nation lifecycle and membership.
//!
//! [`NationService`] resolves nation names to guild entries, provisions a nation's
//! role and channels the first time it is joined, removes them on request and
//! grants or revokes nation roles for members. Provisioning and removal are not
//! transactional: a platform failure halfway through leaves the resources created
//! or not yet deleted in place, and their IDs are logged for manual cleanup.

pub mod lock;
pub mod membership;
pub mod provision;

use serenity::all::{ChannelId, GuildId, RoleId};
use std::fmt;

use crate::{
    error::AppError,
    model::nation::{NationEntry, GLOBAL_NATION},
    platform::Platform,
    state::AppState,
};

pub struct NationService<'a> {
    state: &'a AppState,
    platform: &'a dyn Platform,
}

impl<'a> NationService<'a> {
    pub fn new(state: &'a AppState, platform: &'a dyn Platform) -> Self {
        Self { state, platform }
    }

    /// Looks up a nation of a guild, optionally provisioning it.
    ///
    /// `"Global"` always resolves to the virtual entry wrapping the guild's global
    /// role. Other names resolve to their registered entry; unregistered catalog
    /// nations are provisioned when `create_if_missing` is set.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to look in
    /// - `name` - Title-cased nation name
    /// - `create_if_missing` - Provision the nation if it is in the catalog but not registered
    ///
    /// # Returns
    /// - `Ok(Some(NationEntry))` - The matching entry
    /// - `Ok(None)` - The nation is not registered and was not provisioned
    /// - `Err(AppError::NotFound)` - The guild is not set up
    /// - `Err(AppError::DiscordErr)` - Provisioning failed
    pub async fn resolve(
        &self,
        guild_id: GuildId,
        name: &str,
        create_if_missing: bool,
    ) -> Result<Option<NationEntry>, AppError> {
        let guild = self.state.cache.get(guild_id).await?;

        if name == GLOBAL_NATION {
            return Ok(Some(guild.global_entry()));
        }

        if let Some(entry) = guild.nation(name) {
            return Ok(Some(entry.clone()));
        }

        if create_if_missing && self.state.catalog.contains(name) {
            return self.provision(guild_id, name).await.map(Some);
        }

        Ok(None)
    }
}

/// Resources touched by a lifecycle operation before it stopped.
///
/// Rendered into the error log when provisioning or removal fails midway.
#[derive(Debug, Default)]
pub(crate) struct Resources {
    roles: Vec<RoleId>,
    channels: Vec<ChannelId>,
}

impl Resources {
    fn role(&mut self, role: RoleId) {
        self.roles.push(role);
    }

    fn channel(&mut self, channel: ChannelId) {
        self.channels.push(channel);
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<String> = self.roles.iter().map(|id| id.to_string()).collect();
        let channels: Vec<String> = self.channels.iter().map(|id| id.to_string()).collect();
        write!(
            f,
            "roles [{}], channels [{}]",
            roles.join(", "),
            channels.join(", ")
        )
    }
}
