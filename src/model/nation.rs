use serenity::all::{ChannelId, RoleId};

/// Name of the synthetic nation backed by the guild's global role.
pub const GLOBAL_NATION: &str = "Global";

/// Emoji shown next to the synthetic Global nation.
pub const GLOBAL_NATION_EMOJI: &str = "🌐";

/// A nation as known to one guild.
///
/// Real nations are provisioned on first use and own a role plus a channel category.
/// The Global entry is synthesized on demand from the guild's global role; it is never
/// stored in a guild's nation map and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NationEntry {
    /// A provisioned nation with its own role and channel category.
    Real {
        /// Role granted to members of the nation
        role: RoleId,
        /// Category holding the nation's text and voice channels
        category: ChannelId,
        /// Display emoji from the nation catalog
        emoji: String,
    },
    /// The cross-nation entry wrapping the guild's global role.
    Global {
        /// The guild's global role
        role: RoleId,
        /// Always [`GLOBAL_NATION_EMOJI`]
        emoji: String,
    },
}

impl NationEntry {
    /// Builds the virtual Global entry for a guild's global role.
    pub fn global(role: RoleId) -> Self {
        Self::Global {
            role,
            emoji: GLOBAL_NATION_EMOJI.to_string(),
        }
    }

    pub fn role(&self) -> RoleId {
        match self {
            Self::Real { role, .. } | Self::Global { role, .. } => *role,
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            Self::Real { emoji, .. } | Self::Global { emoji, .. } => emoji,
        }
    }

    /// Category of a real nation; `None` for Global.
    pub fn category(&self) -> Option<ChannelId> {
        match self {
            Self::Real { category, .. } => Some(*category),
            Self::Global { .. } => None,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global { .. })
    }
}

/// Formats the label used for a nation's role, category and messages.
pub fn nation_label(emoji: &str, name: &str) -> String {
    format!("{} {}", emoji, name)
}

/// Canonicalizes a nation name the way members are expected to type it.
///
/// Every letter that follows a non-letter (or starts the string) is uppercased and
/// every other letter is lowercased, so `"united states"` becomes `"United States"`
/// and `"côte d'ivoire"` becomes `"Côte D'Ivoire"`. Surrounding whitespace is trimmed.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut previous_is_letter = false;

    for c in name.trim().chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}
