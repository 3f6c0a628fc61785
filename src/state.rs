//! Application state shared across all event handlers.
//!
//! `AppState` holds the guild cache, the nation catalog, the config repository and
//! the per-nation locks. It is built once during startup and then cloned into the
//! event handler and the nickname scheduler. Every field is reference-counted, so
//! clones share the same underlying state.
//!
//! The platform client is deliberately not part of the state: handlers wrap the
//! HTTP client of the context they were invoked with, and tests pass an in-memory
//! platform instead.

use std::sync::Arc;

use crate::{
    data::{cache::GuildCache, catalog::NationCatalog, config::ConfigRepository},
    service::nation::lock::NationLocks,
};

#[derive(Clone)]
pub struct AppState {
    /// In-memory state of every managed guild.
    pub cache: GuildCache,

    /// Nation names and emojis available to members.
    pub catalog: Arc<NationCatalog>,

    /// Repository rewriting the config file after every mutation.
    pub config_repo: Arc<ConfigRepository>,

    /// Token as stored in the config file.
    ///
    /// Written back unchanged on every save. A token supplied through the
    /// environment is used to log in but never persisted.
    pub file_token: Arc<String>,

    /// Serializes provisioning and removal of the same nation in the same guild.
    pub nation_locks: NationLocks,
}

impl AppState {
    /// Creates the application state with an empty guild cache.
    ///
    /// # Arguments
    /// - `catalog` - Loaded nation catalog
    /// - `config_repo` - Repository of the config file
    /// - `file_token` - Token read from the config file
    ///
    /// # Returns
    /// - `AppState` - State ready to be rehydrated on the first `ready` event
    pub fn new(catalog: NationCatalog, config_repo: ConfigRepository, file_token: String) -> Self {
        Self {
            cache: GuildCache::new(),
            catalog: Arc::new(catalog),
            config_repo: Arc::new(config_repo),
            file_token: Arc::new(file_token),
            nation_locks: NationLocks::new(),
        }
    }
}
