use super::*;

fn state(guild_id: u64) -> GuildState {
    GuildState::new(
        GuildId::new(guild_id),
        RoleId::new(1),
        ChannelId::new(2),
        ChannelId::new(3),
        MessageId::new(4),
    )
}

/// Tests that unknown guilds are reported as not found.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn get_reports_unknown_guild() {
    let cache = GuildCache::new();

    let result = cache.get(GuildId::new(100)).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

/// Tests mutating a guild through `update`.
///
/// Expected: Ok with the change visible to later reads
#[tokio::test]
async fn update_mutates_in_place() -> Result<(), AppError> {
    let cache = GuildCache::new();
    cache.insert(state(100)).await;

    cache
        .update(GuildId::new(100), |guild| {
            guild.add_nation(
                "France".to_string(),
                RoleId::new(11),
                ChannelId::new(12),
                "🇫🇷".to_string(),
            )
        })
        .await?;

    let guild = cache.get(GuildId::new(100)).await?;
    assert!(guild.nation("France").is_some());

    Ok(())
}

/// Tests that quarantined records survive snapshots without being served.
///
/// Expected: snapshot contains both guilds, get only finds the active one
#[tokio::test]
async fn quarantined_records_are_kept_in_snapshot() {
    let cache = GuildCache::new();
    cache.insert(state(100)).await;
    let broken: crate::model::config::GuildConfigRecord =
        serde_json::from_value(fixture::guild_record(5, 6, 7, 8)).unwrap();
    cache.quarantine(200, broken.clone()).await;

    let snapshot = cache.snapshot("secret").await;

    assert_eq!(snapshot.guilds.len(), 2);
    assert_eq!(snapshot.guilds[&200], broken);
    assert!(cache.find(GuildId::new(200)).await.is_none());
    assert!(cache.knows(GuildId::new(200)).await);
    assert_eq!(cache.guild_ids().await, vec![GuildId::new(100)]);
}

/// Tests that inserting a guild lifts its quarantine.
#[tokio::test]
async fn insert_replaces_quarantine() {
    let cache = GuildCache::new();
    let broken: crate::model::config::GuildConfigRecord =
        serde_json::from_value(fixture::guild_record(5, 6, 7, 8)).unwrap();
    cache.quarantine(100, broken).await;

    cache.insert(state(100)).await;

    let snapshot = cache.snapshot("secret").await;
    assert_eq!(snapshot.guilds[&100].global_role_id, 1);
}
