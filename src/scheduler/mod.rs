//! Cron jobs run alongside the bot.
//!
//! - `nickname_sync` - Periodic sweep adding missing nation prefixes to nicknames

pub mod nickname_sync;
