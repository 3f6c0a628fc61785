use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError, platform::discord::DiscordPlatform, service::nickname::NicknameService,
    state::AppState,
};

/// Starts the nickname sync scheduler
///
/// Every run sweeps all managed guilds and adds the nation prefix to members whose
/// nickname lacks it. Quarantined guilds are skipped. A sweep never strips a prefix;
/// that only happens when a member's roles change.
///
/// # Arguments
/// - `state`: Shared application state
/// - `discord_http`: Discord HTTP client shared with the bot
/// - `cron`: Six-field cron expression, hourly by default
pub async fn start_scheduler(
    state: AppState,
    discord_http: Arc<Http>,
    cron: &str,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();
    let job_http = discord_http.clone();

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let state = job_state.clone();
        let http = job_http.clone();

        Box::pin(async move {
            sync_nicknames(&state, http).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Nickname sync scheduler started ({})", cron);

    Ok(())
}

/// Runs one sweep over every managed guild
async fn sync_nicknames(state: &AppState, discord_http: Arc<Http>) {
    tracing::debug!("Starting nickname sweep");

    let platform = DiscordPlatform::new(discord_http);
    NicknameService::new(state, &platform).sweep_all().await;
}
