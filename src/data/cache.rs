use serenity::all::GuildId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    model::{
        config::{BotConfig, GuildConfigRecord},
        guild::GuildState,
        nation::NationEntry,
    },
};

/// In-memory state of every guild the bot manages.
///
/// Keyed by guild ID. Guilds whose persisted record could not be rehydrated are kept
/// aside as quarantined records: they are not served to handlers, but they are
/// written back unchanged on every save so that a transient startup failure never
/// erases a guild's configuration.
///
/// The lock is only held for the duration of a synchronous read or update, never
/// across a platform call.
#[derive(Clone, Default)]
pub struct GuildCache {
    inner: Arc<RwLock<CacheInner>>,
}

#[derive(Default)]
struct CacheInner {
    guilds: HashMap<GuildId, GuildState>,
    quarantined: BTreeMap<u64, GuildConfigRecord>,
}

impl GuildCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of a guild's state.
    ///
    /// # Returns
    /// - `Ok(GuildState)` - The guild's current state
    /// - `Err(AppError::NotFound)` - The bot does not manage this guild
    pub async fn get(&self, guild_id: GuildId) -> Result<GuildState, AppError> {
        self.find(guild_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Guild {} is not set up", guild_id)))
    }

    pub async fn find(&self, guild_id: GuildId) -> Option<GuildState> {
        self.inner.read().await.guilds.get(&guild_id).cloned()
    }

    /// Whether the guild is either active or quarantined.
    pub async fn knows(&self, guild_id: GuildId) -> bool {
        let inner = self.inner.read().await;
        inner.guilds.contains_key(&guild_id) || inner.quarantined.contains_key(&guild_id.get())
    }

    /// Adds or replaces a guild's state, lifting any quarantine on it.
    pub async fn insert(&self, state: GuildState) {
        let mut inner = self.inner.write().await;
        inner.quarantined.remove(&state.guild_id.get());
        inner.guilds.insert(state.guild_id, state);
    }

    /// Mutates a guild's state in place.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to update
    /// - `f` - Mutation applied while the write lock is held
    ///
    /// # Returns
    /// - `Ok(R)` - Whatever `f` returned
    /// - `Err(AppError::NotFound)` - The bot does not manage this guild
    pub async fn update<F, R>(&self, guild_id: GuildId, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut GuildState) -> R,
    {
        let mut inner = self.inner.write().await;
        let state = inner
            .guilds
            .get_mut(&guild_id)
            .ok_or_else(|| AppError::NotFound(format!("Guild {} is not set up", guild_id)))?;
        Ok(f(state))
    }

    /// Drops a nation from a guild's state.
    ///
    /// # Returns
    /// - `Ok(Some(NationEntry))` - The removed entry
    /// - `Ok(None)` - The nation was not registered
    /// - `Err(AppError::NotFound)` - The bot does not manage this guild
    pub async fn remove_nation(
        &self,
        guild_id: GuildId,
        name: &str,
    ) -> Result<Option<NationEntry>, AppError> {
        self.update(guild_id, |guild| guild.remove_nation(name)).await
    }

    /// Keeps a record that failed rehydration so it survives later saves.
    pub async fn quarantine(&self, guild_id: u64, record: GuildConfigRecord) {
        let mut inner = self.inner.write().await;
        inner.guilds.retain(|id, _| id.get() != guild_id);
        inner.quarantined.insert(guild_id, record);
    }

    pub async fn guild_ids(&self) -> Vec<GuildId> {
        let mut ids: Vec<GuildId> = self.inner.read().await.guilds.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Regenerates the persisted configuration from the cache.
    ///
    /// # Arguments
    /// - `token` - Bot token to store alongside the guild records
    ///
    /// # Returns
    /// - `BotConfig` - Active guilds plus quarantined records
    pub async fn snapshot(&self, token: &str) -> BotConfig {
        let inner = self.inner.read().await;

        let mut guilds = inner.quarantined.clone();
        for (guild_id, state) in &inner.guilds {
            guilds.insert(guild_id.get(), state.to_record());
        }

        BotConfig {
            token: token.to_string(),
            guilds,
        }
    }
}
