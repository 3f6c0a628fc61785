//! Nation Wars Discord bot.
//!
//! Members pick the nations they play through slash commands or reactions on a
//! welcome message. The bot provisions a role and a private category per nation on
//! first use, keeps member nicknames prefixed with their nation's emoji and persists
//! every guild's bindings to a JSON config file.
//!
//! # Architecture
//!
//! - **Bot** (`bot/`) - Gateway event handlers and the slash command registry
//! - **Service** (`service/`) - Nation lifecycle, membership, nicknames and guild setup
//! - **Data** (`data/`) - Nation catalog, config file repository and in-memory guild cache
//! - **Platform** (`platform/`) - Port over the Discord operations the services need
//! - **Model** (`model/`) - Domain and persisted config types
//! - **Error** (`error/`) - Application error types and member-facing messages
//! - **Scheduler** (`scheduler/`) - Periodic nickname sweep

mod bot;
mod config;
mod data;
mod error;
mod model;
mod platform;
mod scheduler;
mod service;
mod startup;
mod state;

use crate::{config::Config, error::AppError, scheduler::nickname_sync};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let loaded = startup::load_state(&config).await?;

    tracing::info!("Starting Nation Wars bot");

    let (bot_client, discord_http) =
        bot::start::init_bot(&loaded.token, loaded.state.clone(), loaded.guilds).await?;

    // Start nickname sync scheduler
    let scheduler_state = loaded.state.clone();
    let scheduler_cron = config.nickname_sync_cron.clone();
    tokio::spawn(async move {
        if let Err(e) =
            nickname_sync::start_scheduler(scheduler_state, discord_http, &scheduler_cron).await
        {
            tracing::error!("Nickname sync scheduler error: {}", e);
        }
    });

    bot::start::start_bot(bot_client).await
}
