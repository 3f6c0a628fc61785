use thiserror::Error;

/// Errors raised while loading the process configuration and config files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the environment variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Neither the config file nor the environment provides a bot token.
    #[error("No bot token configured: set `token` in {0} or DISCORD_BOT_TOKEN")]
    MissingToken(String),

    /// A file the bot needs at startup could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        /// Path of the file
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A JSON file could not be parsed.
    #[error("Failed to parse {path}: {source}")]
    ParseFile {
        /// Path of the file
        path: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A persisted guild record holds an ID that can never be valid.
    ///
    /// Discord snowflakes are non-zero, so a zero ID indicates a hand-edited or
    /// truncated config file.
    #[error("Guild {guild_id} has an invalid {field} in the config file")]
    InvalidRecord {
        /// Guild the record belongs to
        guild_id: u64,
        /// Name of the offending field
        field: String,
    },
}
