//! Error types and user-facing response mapping.
//!
//! This module provides the bot's error hierarchy and the conversion from errors into
//! the message a member sees after running a command. The `AppError` enum is the
//! top-level error type that wraps domain-specific errors. Domain errors such as
//! `NationError` render their own message, while every other failure is logged in
//! full and replaced by a generic notice.

pub mod config;
pub mod nation;

use thiserror::Error;

use crate::{
    error::{config::ConfigError, nation::NationError},
    model::command::CommandResponse,
};

/// Message shown to members when a command fails for a reason they cannot fix.
pub const GENERIC_FAILURE_MESSAGE: &str = "⚠️ Something went wrong -- check the logs... 😖";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic error conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup, environment loading or config file parsing.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Nation lifecycle or membership rejection.
    ///
    /// Rendered to the member as-is; never logged as a failure.
    #[error(transparent)]
    NationErr(#[from] NationError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Covers every failed platform call: missing
    /// permissions, unknown objects and rate limits alike.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error while reading or writing the config file.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// JSON serialization error while writing the config file.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid command input.
    ///
    /// The message is shown to the member.
    ///
    /// # Fields
    /// - Message describing what was invalid about the input
    #[error("{0}")]
    BadRequest(String),

    /// Internal error with custom message.
    ///
    /// The message is logged but a generic message is returned to the member.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the response shown to the member who ran a command.
    ///
    /// Nation errors and bad requests carry their own user-facing text. Every other
    /// variant is logged with full detail and replaced by a generic message so that
    /// platform internals never leak into the channel.
    ///
    /// # Returns
    /// - `CommandResponse` - Ephemeral message describing the outcome
    pub fn into_response(self) -> CommandResponse {
        match self {
            Self::NationErr(err) => CommandResponse::new(err.to_string()),
            Self::BadRequest(msg) => CommandResponse::new(format!("❌ {}", msg)),
            err => {
                tracing::error!("Command failed: {}", err);
                CommandResponse::new(GENERIC_FAILURE_MESSAGE)
            }
        }
    }
}
