//! Process configuration read from the environment.
//!
//! Everything here is resolved once at startup. Per-guild settings live in the
//! config file instead and are handled by [`crate::data::config::ConfigRepository`].

use std::path::PathBuf;
use tokio_cron_scheduler::Job;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_CONFIG_PATH: &str = "config.json";
const DEFAULT_NATIONS_PATH: &str = "nations.json";
/// Top of every hour.
const DEFAULT_NICKNAME_SYNC_CRON: &str = "0 0 * * * *";

pub struct Config {
    /// Path of the persisted guild configuration.
    pub config_path: PathBuf,
    /// Path of the nation catalog.
    pub nations_path: PathBuf,
    /// Token taking precedence over the one stored in the config file.
    pub token_override: Option<String>,
    /// Cron expression of the nickname sweep.
    pub nickname_sync_cron: String,
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - Configuration with defaults applied for unset variables
    /// - `Err(AppError::ConfigErr)` - A variable is set but unusable
    pub fn from_env() -> Result<Self, AppError> {
        let token_override = optional_var("DISCORD_BOT_TOKEN");
        if matches!(&token_override, Some(token) if token.trim().is_empty()) {
            return Err(ConfigError::InvalidEnvVar {
                name: "DISCORD_BOT_TOKEN".to_string(),
                reason: "token is blank".to_string(),
            }
            .into());
        }

        let nickname_sync_cron = optional_var("NICKNAME_SYNC_CRON")
            .unwrap_or_else(|| DEFAULT_NICKNAME_SYNC_CRON.to_string());
        validate_cron(&nickname_sync_cron)?;

        Ok(Self {
            config_path: optional_var("NATION_WARS_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            nations_path: optional_var("NATIONS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_NATIONS_PATH)),
            token_override,
            nickname_sync_cron,
        })
    }

    /// Picks the token used to log in.
    ///
    /// # Arguments
    /// - `file_token` - Token stored in the config file
    ///
    /// # Returns
    /// - `Ok(String)` - The environment override if set, else the file token
    /// - `Err(ConfigError::MissingToken)` - Neither source provides a token
    pub fn resolve_token(&self, file_token: &str) -> Result<String, ConfigError> {
        match &self.token_override {
            Some(token) => Ok(token.clone()),
            None if !file_token.trim().is_empty() => Ok(file_token.to_string()),
            None => Err(ConfigError::MissingToken(
                self.config_path.display().to_string(),
            )),
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Rejects cron expressions the scheduler would fail on, before the bot connects.
fn validate_cron(expression: &str) -> Result<(), ConfigError> {
    Job::new_async(expression, |_uuid, _lock| Box::pin(async {}))
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "NICKNAME_SYNC_CRON".to_string(),
            reason: e.to_string(),
        })
}
