//! Persisted configuration records.
//!
//! These records are the on-disk twin of the guild cache, addressed by numeric IDs.
//! They are regenerated from the cache on every save and never mutated on their own.
//! Maps are ordered so that consecutive saves of the same state produce identical files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Discord bot token.
    #[serde(default)]
    pub token: String,
    /// Per-guild settings keyed by guild ID.
    #[serde(default)]
    pub guilds: BTreeMap<u64, GuildConfigRecord>,
}

/// Settings of one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfigRecord {
    pub global_role_id: u64,
    pub admin_notifications_channel_id: u64,
    pub welcome_channel_id: u64,
    pub welcome_message_id: u64,
    /// Registered nations keyed by title-cased name.
    #[serde(default)]
    pub nations: BTreeMap<String, NationConfigRecord>,
}

/// Bindings of one registered nation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationConfigRecord {
    pub role_id: u64,
    /// Category owning the nation's channels. Older files call it `channel_id`.
    #[serde(alias = "channel_id")]
    pub category_id: u64,
    pub emoji: String,
}
