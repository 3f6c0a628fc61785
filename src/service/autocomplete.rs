//! Nation suggestions for command autocomplete.

use serenity::all::{GuildId, RoleId};

use crate::{
    data::catalog::NationCatalog,
    model::{
        guild::GuildState,
        nation::{nation_label, GLOBAL_NATION, GLOBAL_NATION_EMOJI},
    },
    state::AppState,
};

/// Maximum number of choices the platform accepts in one autocomplete response.
pub const MAX_CHOICES: usize = 25;

/// Command option being completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteContext {
    /// Catalog nations the member does not hold, plus Global if they lack it.
    Join,
    /// Registered nations the member holds, plus Global if they hold it.
    Leave,
    /// Every registered nation.
    AdminRemove,
}

/// A suggested nation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationChoice {
    /// Shown to the member, e.g. `"🇫🇷 France"`.
    pub label: String,
    /// Sent back as the option value, e.g. `"France"`.
    pub value: String,
}

impl NationChoice {
    fn new(emoji: &str, name: &str) -> Self {
        Self {
            label: nation_label(emoji, name),
            value: name.to_string(),
        }
    }
}

pub struct AutocompleteService<'a> {
    state: &'a AppState,
}

impl<'a> AutocompleteService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Suggests nations for a member of a guild.
    ///
    /// Returns no choices for guilds that are not set up.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the command runs in
    /// - `member_roles` - Roles the requesting member currently holds
    /// - `context` - Command option being completed
    /// - `query` - What the member has typed so far
    pub async fn suggest(
        &self,
        guild_id: GuildId,
        member_roles: &[RoleId],
        context: AutocompleteContext,
        query: &str,
    ) -> Vec<NationChoice> {
        match self.state.cache.find(guild_id).await {
            Some(guild) => suggest(&self.state.catalog, &guild, member_roles, context, query),
            None => Vec::new(),
        }
    }
}

/// Ranks nation suggestions for a query.
///
/// Matching is case-insensitive on the nation name. Names starting with the query
/// come before names merely containing it, each group in alphabetical order. Global,
/// when offered and matching, always comes first. At most [`MAX_CHOICES`] choices are
/// returned; further matches are dropped.
pub fn suggest(
    catalog: &NationCatalog,
    guild: &GuildState,
    member_roles: &[RoleId],
    context: AutocompleteContext,
    query: &str,
) -> Vec<NationChoice> {
    let holds_global = member_roles.contains(&guild.global_role);
    let offer_global = match context {
        AutocompleteContext::Join => !holds_global,
        AutocompleteContext::Leave => holds_global,
        AutocompleteContext::AdminRemove => false,
    };

    let candidates: Vec<(&str, &str)> = match context {
        AutocompleteContext::Join => catalog
            .iter()
            .filter(|(name, _)| {
                guild
                    .nation(name)
                    .map_or(true, |entry| !member_roles.contains(&entry.role()))
            })
            .collect(),
        AutocompleteContext::Leave => guild
            .held_nations(member_roles)
            .map(|(name, entry)| (name, entry.emoji()))
            .collect(),
        AutocompleteContext::AdminRemove => guild
            .nations()
            .map(|(name, entry)| (name, entry.emoji()))
            .collect(),
    };

    let query = query.trim().to_lowercase();
    let mut ranked: Vec<(u8, &str, &str)> = candidates
        .into_iter()
        .filter_map(|(name, emoji)| rank(name, &query).map(|rank| (rank, name, emoji)))
        .collect();
    ranked.sort();

    let global = (offer_global && rank(GLOBAL_NATION, &query).is_some())
        .then(|| NationChoice::new(GLOBAL_NATION_EMOJI, GLOBAL_NATION));

    global
        .into_iter()
        .chain(
            ranked
                .into_iter()
                .map(|(_, name, emoji)| NationChoice::new(emoji, name)),
        )
        .take(MAX_CHOICES)
        .collect()
}

/// 0 for a prefix match, 1 for a substring match.
fn rank(name: &str, query: &str) -> Option<u8> {
    let name = name.to_lowercase();
    if name.starts_with(query) {
        Some(0)
    } else if name.contains(query) {
        Some(1)
    } else {
        None
    }
}
