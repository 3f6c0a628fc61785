//! Discord bot integration.
//!
//! This module connects the bot to Discord and routes gateway events to the
//! services. Slash commands go through the [`command::CommandRegistry`]; every other
//! event has a dedicated function in [`handler`].
//!
//! The bot is initialized in `main` and runs in its own tokio task. Its HTTP client
//! is shared with the nickname scheduler so that both go through the same rate
//! limiter.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild creation events and interactions
//! - `GUILD_MEMBERS` - Receive member updates for the nickname hook (privileged intent)
//! - `GUILD_MESSAGE_REACTIONS` - Receive reactions on the welcome message
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
