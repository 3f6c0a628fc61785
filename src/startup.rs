//! Process initialization run before the bot connects.

use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    data::{catalog::NationCatalog, config::ConfigRepository},
    error::AppError,
    model::config::{BotConfig, GuildConfigRecord},
    state::AppState,
};

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and falls back to `info` when it is unset or invalid.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Everything loaded from disk before the bot connects.
pub struct LoadedState {
    pub state: AppState,
    /// Token used to log in.
    pub token: String,
    /// Persisted guild records, rehydrated on the first `ready` event.
    pub guilds: BTreeMap<u64, GuildConfigRecord>,
}

/// Loads the nation catalog and the config file and builds the application state.
///
/// A missing config file is treated as an empty configuration so that a fresh
/// deployment can start from `DISCORD_BOT_TOKEN` alone; the file is created on the
/// first save.
///
/// # Arguments
/// - `config` - Process configuration
///
/// # Returns
/// - `Ok(LoadedState)` - State with an empty guild cache, the login token and the guild records
/// - `Err(AppError::ConfigErr)` - A file is unreadable or malformed, or no token is configured
pub async fn load_state(config: &Config) -> Result<LoadedState, AppError> {
    let catalog = NationCatalog::load(&config.nations_path).await?;
    if catalog.is_empty() {
        tracing::warn!(
            "Nation catalog {} is empty; members will not be able to join any nation",
            config.nations_path.display()
        );
    }

    let config_repo = ConfigRepository::new(&config.config_path);
    let bot_config = if tokio::fs::try_exists(&config.config_path).await? {
        config_repo.load().await?
    } else {
        tracing::warn!(
            "Config file {} not found; starting without any guild",
            config.config_path.display()
        );
        BotConfig::default()
    };

    let token = config.resolve_token(&bot_config.token)?;

    Ok(LoadedState {
        state: AppState::new(catalog, config_repo, bot_config.token),
        token,
        guilds: bot_config.guilds,
    })
}
