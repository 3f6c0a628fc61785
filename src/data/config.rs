use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::{
    error::{config::ConfigError, AppError},
    model::config::BotConfig,
};

/// Reads and rewrites the bot's JSON config file.
///
/// Every save overwrites the whole file with a pretty-printed document. Saves are
/// serialized by an internal lock so that two overlapping handlers never interleave
/// their writes; the last writer wins.
pub struct ConfigRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ConfigRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the config file.
    ///
    /// # Returns
    /// - `Ok(BotConfig)` - The parsed configuration
    /// - `Err(ConfigError::ReadFile)` - The file could not be read
    /// - `Err(ConfigError::ParseFile)` - The file is not a valid config document
    pub async fn load(&self) -> Result<BotConfig, AppError> {
        let display_path = self.path.display().to_string();

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ConfigError::ReadFile {
                path: display_path.clone(),
                source,
            })?;

        let config: BotConfig =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::ParseFile {
                path: display_path.clone(),
                source,
            })?;

        tracing::info!(
            "Loaded config for {} guilds from {}",
            config.guilds.len(),
            display_path
        );

        Ok(config)
    }

    /// Overwrites the config file with `config`.
    ///
    /// # Arguments
    /// - `config` - Complete configuration to write
    ///
    /// # Returns
    /// - `Ok(())` - The file was written
    /// - `Err(AppError::JsonErr)` - Serialization failed
    /// - `Err(AppError::IoErr)` - The file could not be written
    pub async fn save(&self, config: &BotConfig) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(config)?;

        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&self.path, json).await?;

        tracing::debug!(
            "Saved config for {} guilds to {}",
            config.guilds.len(),
            self.path.display()
        );

        Ok(())
    }
}
