use super::*;
use crate::{
    model::config::GuildConfigRecord,
    platform::{ChannelKind, NewChannel},
    service::{
        guild::{welcome_text, ADMIN_CHANNEL_NAME, WELCOME_CHANNEL_NAME},
        nation::NationService,
    },
};
use serenity::all::{PermissionOverwriteType, Permissions};
use std::collections::BTreeMap;

/// Tests the resources created when the bot joins a guild.
///
/// Expected: global role, hidden admin channel, read-only welcome channel with message
#[tokio::test]
async fn bootstrap_creates_guild_resources() -> Result<(), AppError> {
    let setup = Setup::new().await;
    let guild = setup.state.cache.get(setup.guild_id).await?;

    let role = setup.platform.role(guild.global_role).unwrap();
    assert_eq!(role.name, "🌐 Global");
    assert!(!role.hoist);
    assert!(!role.mentionable);

    let admin = setup
        .platform
        .channel(guild.admin_notifications_channel)
        .unwrap();
    assert_eq!(admin.name, ADMIN_CHANNEL_NAME);
    assert!(admin.overwrites.iter().any(|o| {
        o.kind == PermissionOverwriteType::Role(RoleId::new(GUILD_ID))
            && o.deny.contains(Permissions::VIEW_CHANNEL)
    }));

    let welcome = setup.platform.channel(guild.welcome_channel).unwrap();
    assert_eq!(welcome.name, WELCOME_CHANNEL_NAME);
    assert!(welcome.overwrites.iter().any(|o| {
        o.kind == PermissionOverwriteType::Role(RoleId::new(GUILD_ID))
            && o.deny.contains(Permissions::SEND_MESSAGES)
    }));
    assert_eq!(
        setup.platform.message(guild.welcome_message),
        Some(welcome_text())
    );

    let config = setup.test.read_config().unwrap();
    assert_eq!(
        config["guilds"][GUILD_ID.to_string()]["welcome_message_id"],
        guild.welcome_message.get()
    );
    assert_eq!(config["token"], "test-token");

    Ok(())
}

/// Tests restoring a saved guild into a fresh cache.
///
/// Expected: one guild loaded with its nation
#[tokio::test]
async fn rehydrate_restores_saved_guilds() -> Result<(), AppError> {
    let setup = Setup::new().await;
    NationService::new(&setup.state, &setup.platform)
        .provision(setup.guild_id, "France")
        .await?;
    let saved = setup.state.config_repo.load().await?;
    let fresh = AppState::new(
        (*setup.state.catalog).clone(),
        ConfigRepository::new(&setup.test.config_path),
        saved.token.clone(),
    );

    let loaded = GuildService::new(&fresh, &setup.platform)
        .rehydrate(saved.guilds)
        .await;

    assert_eq!(loaded, 1);
    let guild = fresh.cache.get(setup.guild_id).await?;
    assert_eq!(guild, setup.state.cache.get(setup.guild_id).await?);

    Ok(())
}

/// Tests that rehydrating a guild lists its roles and channels once.
///
/// Expected: one role listing and one channel listing for a guild with three nations
#[tokio::test]
async fn rehydrate_lists_resources_once_per_guild() -> Result<(), AppError> {
    let setup = Setup::new().await;
    let nations = NationService::new(&setup.state, &setup.platform);
    for name in ["France", "Japan", "Spain"] {
        nations.provision(setup.guild_id, name).await?;
    }
    let saved = setup.state.config_repo.load().await?;
    let fresh = AppState::new(
        (*setup.state.catalog).clone(),
        ConfigRepository::new(&setup.test.config_path),
        saved.token.clone(),
    );
    let calls_before = setup.platform.calls().len();

    let loaded = GuildService::new(&fresh, &setup.platform)
        .rehydrate(saved.guilds)
        .await;

    assert_eq!(loaded, 1);
    let calls = &setup.platform.calls()[calls_before..];
    assert_eq!(calls.iter().filter(|op| **op == "role_ids").count(), 1);
    assert_eq!(calls.iter().filter(|op| **op == "channel_ids").count(), 1);

    Ok(())
}

/// Tests that a guild whose global role was deleted is quarantined.
///
/// Expected: guild not served but its record survives the next save unchanged
#[tokio::test]
async fn rehydrate_quarantines_broken_guilds() -> Result<(), AppError> {
    let setup = Setup::new().await;
    let saved = setup.state.config_repo.load().await?;
    let original: GuildConfigRecord = saved.guilds[&GUILD_ID].clone();
    setup
        .platform
        .remove_role(RoleId::new(original.global_role_id));

    let other_guild = GuildId::new(200);
    let other_role = setup.platform.seed_role(other_guild, "🌐 Global");
    let admin = setup.platform.seed_channel(
        other_guild,
        NewChannel::new(ADMIN_CHANNEL_NAME, ChannelKind::Text),
    );
    let welcome = setup.platform.seed_channel(
        other_guild,
        NewChannel::new(WELCOME_CHANNEL_NAME, ChannelKind::Text),
    );
    let message = setup.platform.seed_message(welcome, &welcome_text());
    let mut records = saved.guilds.clone();
    records.insert(
        200,
        GuildConfigRecord {
            global_role_id: other_role.get(),
            admin_notifications_channel_id: admin.get(),
            welcome_channel_id: welcome.get(),
            welcome_message_id: message.get(),
            nations: BTreeMap::new(),
        },
    );

    let fresh = AppState::new(
        (*setup.state.catalog).clone(),
        ConfigRepository::new(&setup.test.config_path),
        "test-token".to_string(),
    );
    let loaded = GuildService::new(&fresh, &setup.platform)
        .rehydrate(records)
        .await;

    assert_eq!(loaded, 1);
    assert!(fresh.cache.find(setup.guild_id).await.is_none());
    assert!(fresh.cache.find(other_guild).await.is_some());

    crate::service::config::ConfigService::new(&fresh)
        .save()
        .await?;
    let resaved = fresh.config_repo.load().await?;
    assert_eq!(resaved.guilds[&GUILD_ID], original);
    assert!(resaved.guilds.contains_key(&200));

    Ok(())
}

/// Tests posting a fresh welcome message.
///
/// Expected: new message posted, old one deleted, config updated
#[tokio::test]
async fn reset_welcome_replaces_message() -> Result<(), AppError> {
    let setup = Setup::new().await;
    let before = setup.state.cache.get(setup.guild_id).await?;

    let link = GuildService::new(&setup.state, &setup.platform)
        .reset_welcome(setup.guild_id)
        .await?;

    let after = setup.state.cache.get(setup.guild_id).await?;
    assert_ne!(after.welcome_message, before.welcome_message);
    assert!(setup.platform.message(before.welcome_message).is_none());
    assert_eq!(
        setup.platform.message(after.welcome_message),
        Some(welcome_text())
    );
    assert!(link.ends_with(&after.welcome_message.to_string()));

    let config = setup.test.read_config().unwrap();
    assert_eq!(
        config["guilds"][GUILD_ID.to_string()]["welcome_message_id"],
        after.welcome_message.get()
    );

    Ok(())
}

/// Tests adopting an existing message as the welcome message.
#[tokio::test]
async fn replace_welcome_adopts_existing_message() -> Result<(), AppError> {
    let setup = Setup::new().await;
    let guild = setup.state.cache.get(setup.guild_id).await?;
    let custom = setup
        .platform
        .seed_message(guild.welcome_channel, "Pick your nation!");

    GuildService::new(&setup.state, &setup.platform)
        .replace_welcome(setup.guild_id, &custom.to_string())
        .await?;

    let guild = setup.state.cache.get(setup.guild_id).await?;
    assert_eq!(guild.welcome_message, custom);

    Ok(())
}

/// Tests rejected replacement IDs.
///
/// Expected: Err(AppError::BadRequest) for malformed IDs and messages outside the welcome channel
#[tokio::test]
async fn replace_welcome_rejects_invalid_ids() -> Result<(), AppError> {
    let setup = Setup::new().await;
    let service = GuildService::new(&setup.state, &setup.platform);
    let guild = setup.state.cache.get(setup.guild_id).await?;
    let elsewhere = setup
        .platform
        .seed_message(guild.admin_notifications_channel, "hello");

    let malformed = service.replace_welcome(setup.guild_id, "abc").await;
    let zero = service.replace_welcome(setup.guild_id, "0").await;
    let wrong_channel = service
        .replace_welcome(setup.guild_id, &elsewhere.to_string())
        .await;

    assert!(matches!(malformed, Err(AppError::BadRequest(_))));
    assert!(matches!(zero, Err(AppError::BadRequest(_))));
    assert!(matches!(wrong_channel, Err(AppError::BadRequest(_))));
    assert_eq!(
        setup.state.cache.get(setup.guild_id).await?.welcome_message,
        guild.welcome_message
    );

    Ok(())
}

/// Tests editing the welcome message content.
///
/// Expected: the three lines joined by newlines
#[tokio::test]
async fn edit_welcome_sets_three_lines() -> Result<(), AppError> {
    let setup = Setup::new().await;
    let guild = setup.state.cache.get(setup.guild_id).await?;

    let link = GuildService::new(&setup.state, &setup.platform)
        .edit_welcome(setup.guild_id, ["one", "two", "three"])
        .await?;

    assert_eq!(
        setup.platform.message(guild.welcome_message),
        Some("one\ntwo\nthree".to_string())
    );
    assert_eq!(
        link,
        format!(
            "https://discord.com/channels/{}/{}/{}",
            GUILD_ID, guild.welcome_channel, guild.welcome_message
        )
    );

    Ok(())
}

/// Tests that operations on unknown guilds report not found.
#[tokio::test]
async fn unknown_guild_is_not_found() {
    let setup = Setup::new().await;

    let result = GuildService::new(&setup.state, &setup.platform)
        .reset_welcome(GuildId::new(1))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
