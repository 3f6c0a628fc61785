//! Test fixtures providing reusable test data without touching the filesystem.
//!
//! Fixtures build the JSON documents the bot reads at startup. Pass them to the
//! [`TestBuilder`](crate::builder::TestBuilder) to have them written to disk.

use serde_json::{json, Value};

/// Standard catalog used across tests.
pub fn catalog() -> Vec<(&'static str, &'static str)> {
    vec![
        ("France", "🇫🇷"),
        ("Germany", "🇩🇪"),
        ("Japan", "🇯🇵"),
        ("Spain", "🇪🇸"),
        ("United States", "🇺🇸"),
    ]
}

/// Builds a guild record with no nations.
///
/// # Arguments
/// - `global_role_id` - ID of the global role
/// - `admin_channel_id` - ID of the admin notifications channel
/// - `welcome_channel_id` - ID of the welcome channel
/// - `welcome_message_id` - ID of the welcome message
pub fn guild_record(
    global_role_id: u64,
    admin_channel_id: u64,
    welcome_channel_id: u64,
    welcome_message_id: u64,
) -> Value {
    json!({
        "global_role_id": global_role_id,
        "admin_notifications_channel_id": admin_channel_id,
        "welcome_channel_id": welcome_channel_id,
        "welcome_message_id": welcome_message_id,
        "nations": {},
    })
}

/// Adds a nation binding to a guild record built with [`guild_record`].
///
/// # Arguments
/// - `record` - Guild record to extend
/// - `name` - Title-cased nation name
/// - `role_id` - ID of the nation role
/// - `category_id` - ID of the nation category
/// - `emoji` - Nation emoji
pub fn with_nation_record(
    mut record: Value,
    name: &str,
    role_id: u64,
    category_id: u64,
    emoji: &str,
) -> Value {
    record["nations"][name] = json!({
        "role_id": role_id,
        "category_id": category_id,
        "emoji": emoji,
    });
    record
}
