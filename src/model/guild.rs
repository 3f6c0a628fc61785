use serenity::all::{ChannelId, GuildId, MessageId, RoleId};
use std::collections::BTreeMap;

use crate::{
    error::config::ConfigError,
    model::{
        config::{GuildConfigRecord, NationConfigRecord},
        nation::NationEntry,
    },
};

/// Cached state of one guild the bot is active in.
///
/// Holds the IDs of the bot-managed roles, channels and welcome message together with
/// every provisioned nation. The nation map only ever contains
/// [`NationEntry::Real`] entries; the Global entry is synthesized by
/// [`GuildState::global_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildState {
    pub guild_id: GuildId,
    /// Role granting visibility of every nation's channels.
    pub global_role: RoleId,
    /// Private channel receiving lifecycle notifications.
    pub admin_notifications_channel: ChannelId,
    pub welcome_channel: ChannelId,
    pub welcome_message: MessageId,
    nations: BTreeMap<String, NationEntry>,
}

impl GuildState {
    /// Creates the state of a freshly bootstrapped guild with no nations.
    pub fn new(
        guild_id: GuildId,
        global_role: RoleId,
        admin_notifications_channel: ChannelId,
        welcome_channel: ChannelId,
        welcome_message: MessageId,
    ) -> Self {
        Self {
            guild_id,
            global_role,
            admin_notifications_channel,
            welcome_channel,
            welcome_message,
            nations: BTreeMap::new(),
        }
    }

    /// Converts a persisted record back into guild state.
    ///
    /// Only validates that every stored ID is a possible snowflake; whether the
    /// referenced objects still exist is checked by the guild service during
    /// rehydration.
    ///
    /// # Arguments
    /// - `guild_id` - ID of the guild the record belongs to
    /// - `record` - Persisted guild record
    ///
    /// # Returns
    /// - `Ok(GuildState)` - State with every nation restored
    /// - `Err(ConfigError::InvalidRecord)` - A stored ID is zero
    pub fn from_record(guild_id: u64, record: &GuildConfigRecord) -> Result<Self, ConfigError> {
        let id = |value: u64, field: &str| -> Result<u64, ConfigError> {
            if value == 0 {
                Err(ConfigError::InvalidRecord {
                    guild_id,
                    field: field.to_string(),
                })
            } else {
                Ok(value)
            }
        };

        let mut state = Self::new(
            GuildId::new(id(guild_id, "guild id")?),
            RoleId::new(id(record.global_role_id, "global_role_id")?),
            ChannelId::new(id(
                record.admin_notifications_channel_id,
                "admin_notifications_channel_id",
            )?),
            ChannelId::new(id(record.welcome_channel_id, "welcome_channel_id")?),
            MessageId::new(id(record.welcome_message_id, "welcome_message_id")?),
        );

        for (name, nation) in &record.nations {
            state.add_nation(
                name.clone(),
                RoleId::new(id(nation.role_id, &format!("role_id of {}", name))?),
                ChannelId::new(id(nation.category_id, &format!("category_id of {}", name))?),
                nation.emoji.clone(),
            );
        }

        Ok(state)
    }

    /// Converts the state into its persisted record. Global is never included.
    pub fn to_record(&self) -> GuildConfigRecord {
        let nations = self
            .nations
            .iter()
            .filter_map(|(name, entry)| match entry {
                NationEntry::Real {
                    role,
                    category,
                    emoji,
                } => Some((
                    name.clone(),
                    NationConfigRecord {
                        role_id: role.get(),
                        category_id: category.get(),
                        emoji: emoji.clone(),
                    },
                )),
                NationEntry::Global { .. } => None,
            })
            .collect();

        GuildConfigRecord {
            global_role_id: self.global_role.get(),
            admin_notifications_channel_id: self.admin_notifications_channel.get(),
            welcome_channel_id: self.welcome_channel.get(),
            welcome_message_id: self.welcome_message.get(),
            nations,
        }
    }

    /// Returns the registered nation with the given title-cased name.
    pub fn nation(&self, name: &str) -> Option<&NationEntry> {
        self.nations.get(name)
    }

    /// Iterates registered nations in name order.
    pub fn nations(&self) -> impl Iterator<Item = (&str, &NationEntry)> {
        self.nations.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn nation_count(&self) -> usize {
        self.nations.len()
    }

    /// Records a provisioned nation, replacing any previous entry with the same name.
    pub fn add_nation(&mut self, name: String, role: RoleId, category: ChannelId, emoji: String) {
        self.nations.insert(
            name,
            NationEntry::Real {
                role,
                category,
                emoji,
            },
        );
    }

    pub fn remove_nation(&mut self, name: &str) -> Option<NationEntry> {
        self.nations.remove(name)
    }

    /// Builds the virtual entry wrapping the guild's global role.
    pub fn global_entry(&self) -> NationEntry {
        NationEntry::global(self.global_role)
    }

    /// Registered nations whose role is among `roles`.
    pub fn held_nations<'a>(
        &'a self,
        roles: &'a [RoleId],
    ) -> impl Iterator<Item = (&'a str, &'a NationEntry)> {
        self.nations().filter(move |(_, entry)| roles.contains(&entry.role()))
    }

    /// Finds the registered nation using the given emoji.
    pub fn nation_by_emoji(&self, emoji: &str) -> Option<(&str, &NationEntry)> {
        self.nations().find(|(_, entry)| entry.emoji() == emoji)
    }
}
