use crate::data::{cache::GuildCache, catalog::NationCatalog, config::ConfigRepository};
use crate::error::AppError;
use crate::model::guild::GuildState;
use serenity::all::{ChannelId, GuildId, MessageId, RoleId};
use test_utils::{builder::TestBuilder, fixture};

mod cache;
mod catalog;
