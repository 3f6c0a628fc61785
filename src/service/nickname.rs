//! Nation emoji prefixes on member display names.
//!
//! A member holding exactly one nation role shows as `"{emoji} {name}"`. The member
//! update hook keeps prefixes exact by stripping any nation emoji before deciding;
//! the periodic sweep only adds missing prefixes and never strips anything.

use serenity::all::GuildId;

use crate::{
    error::AppError,
    model::{guild::GuildState, member::MemberProfile},
    platform::Platform,
    state::AppState,
};

/// Longest nickname the platform accepts, in characters.
pub const NICKNAME_MAX_CHARS: usize = 32;

/// How strictly a member's name is reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Strip every registered nation emoji prefix, then prepend the held nation's.
    Hook,
    /// Prepend the held nation's emoji if missing.
    Sweep,
}

/// Counters of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub scanned: usize,
    pub renamed: usize,
    pub failed: usize,
}

impl SweepStats {
    fn merge(&mut self, other: SweepStats) {
        self.scanned += other.scanned;
        self.renamed += other.renamed;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Renamed,
    Failed,
}

/// Computes the nickname a member should have.
///
/// # Arguments
/// - `guild` - Guild whose registered nations are considered
/// - `member` - Member to rename
/// - `mode` - Whether existing prefixes may be stripped
///
/// # Returns
/// - `Some(String)` - The new nickname, truncated to [`NICKNAME_MAX_CHARS`]
/// - `None` - The current display name is already correct
pub fn desired_nickname(guild: &GuildState, member: &MemberProfile, mode: SyncMode) -> Option<String> {
    let current = member.display_name();
    let mut held = guild.held_nations(&member.roles);
    let single = match (held.next(), held.next()) {
        (Some((_, entry)), None) => Some(entry.emoji()),
        _ => None,
    };

    let desired = match mode {
        SyncMode::Hook => {
            let mut base = current;
            while let Some(stripped) = guild
                .nations()
                .filter(|(_, entry)| !entry.emoji().is_empty())
                .find_map(|(_, entry)| strip_prefix(base, entry.emoji()))
            {
                base = stripped;
            }
            let base = if base.is_empty() {
                member.username.as_str()
            } else {
                base
            };
            match single {
                Some(emoji) => format!("{} {}", emoji, base),
                None => base.to_string(),
            }
        }
        SyncMode::Sweep => match single {
            Some(emoji) if strip_prefix(current, emoji).is_none() => {
                format!("{} {}", emoji, current)
            }
            _ => return None,
        },
    };

    let desired: String = desired.chars().take(NICKNAME_MAX_CHARS).collect();
    (desired != current).then_some(desired)
}

/// Removes a leading `emoji` and the whitespace after it.
fn strip_prefix<'s>(name: &'s str, emoji: &str) -> Option<&'s str> {
    name.strip_prefix(emoji).map(str::trim_start)
}

pub struct NicknameService<'a> {
    state: &'a AppState,
    platform: &'a dyn Platform,
}

impl<'a> NicknameService<'a> {
    pub fn new(state: &'a AppState, platform: &'a dyn Platform) -> Self {
        Self { state, platform }
    }

    /// Reconciles one member's nickname.
    ///
    /// Rename failures, such as the guild owner who cannot be renamed, are logged at
    /// warn level and reported as `Ok(false)`.
    ///
    /// # Returns
    /// - `Ok(true)` - The member was renamed
    /// - `Ok(false)` - Nothing to do, the guild is not set up, or the rename failed
    pub async fn sync_member(
        &self,
        guild_id: GuildId,
        member: &MemberProfile,
        mode: SyncMode,
    ) -> Result<bool, AppError> {
        let Some(guild) = self.state.cache.find(guild_id).await else {
            return Ok(false);
        };

        Ok(self.apply(&guild, member, mode).await == Outcome::Renamed)
    }

    /// Adds missing prefixes for every member of a guild.
    ///
    /// # Returns
    /// - `Ok(SweepStats)` - Counters of the sweep
    /// - `Err(AppError::NotFound)` - The guild is not set up
    /// - `Err(AppError::DiscordErr)` - The member list could not be fetched
    pub async fn sweep_guild(&self, guild_id: GuildId) -> Result<SweepStats, AppError> {
        let guild = self.state.cache.get(guild_id).await?;
        let bot = self.platform.current_user_id().await?;
        let members = self.platform.guild_members(guild_id).await?;

        let mut stats = SweepStats::default();
        for member in members.iter().filter(|member| member.user_id != bot) {
            stats.scanned += 1;
            match self.apply(&guild, member, SyncMode::Sweep).await {
                Outcome::Renamed => stats.renamed += 1,
                Outcome::Failed => stats.failed += 1,
                Outcome::Unchanged => {}
            }
        }

        Ok(stats)
    }

    /// Sweeps every guild in the cache.
    ///
    /// A guild whose sweep fails is logged and skipped.
    pub async fn sweep_all(&self) -> SweepStats {
        let mut total = SweepStats::default();

        for guild_id in self.state.cache.guild_ids().await {
            match self.sweep_guild(guild_id).await {
                Ok(stats) => total.merge(stats),
                Err(err) => {
                    tracing::error!("Nickname sweep failed for guild {}: {}", guild_id, err)
                }
            }
        }

        tracing::info!(
            "Nickname sweep done: {} scanned, {} renamed, {} failed",
            total.scanned,
            total.renamed,
            total.failed
        );

        total
    }

    async fn apply(&self, guild: &GuildState, member: &MemberProfile, mode: SyncMode) -> Outcome {
        let Some(nickname) = desired_nickname(guild, member, mode) else {
            return Outcome::Unchanged;
        };

        match self
            .platform
            .set_nickname(guild.guild_id, member.user_id, &nickname)
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    "Renamed member {} to {:?} in guild {}",
                    member.user_id,
                    nickname,
                    guild.guild_id
                );
                Outcome::Renamed
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to rename member {} in guild {}: {}",
                    member.user_id,
                    guild.guild_id,
                    err
                );
                Outcome::Failed
            }
        }
    }
}
