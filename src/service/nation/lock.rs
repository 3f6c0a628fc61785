use serenity::all::GuildId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-(guild, nation) async locks.
///
/// Provisioning and removal of a nation span many platform calls. Holding the lock
/// for the nation across them makes a second concurrent join wait and then find the
/// nation already registered, instead of creating a duplicate role and category.
/// Locks for different nations never contend.
#[derive(Clone, Default)]
pub struct NationLocks {
    locks: Arc<Mutex<HashMap<(GuildId, String), Arc<Mutex<()>>>>>,
}

impl NationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a nation of a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the nation belongs to
    /// - `name` - Title-cased nation name
    ///
    /// # Returns
    /// - `OwnedMutexGuard<()>` - Guard releasing the nation when dropped
    pub async fn acquire(&self, guild_id: GuildId, name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry((guild_id, name.to_string()))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        lock.lock_owned().await
    }
}
