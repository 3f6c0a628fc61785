use thiserror::Error;

/// User-facing rejections from the nation lifecycle and membership operations.
///
/// None of these change any state. The display text is sent to the member verbatim,
/// so each variant carries the nation label exactly as it should be shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NationError {
    /// The name is absent from the nation catalog.
    #[error("❌ Invalid value **{0}** -- please pick a valid value from the list 😤")]
    UnknownNation(String),

    /// The nation exists in the catalog but has not been provisioned in this guild.
    #[error("ℹ️ **{0}** is not registered -- nothing to do 😴")]
    NotRegistered(String),

    /// The member already holds the nation's role.
    #[error("ℹ️ You are already in **{0}** -- nothing to do 😴")]
    AlreadyMember(String),

    /// The member does not hold the nation's role.
    #[error("ℹ️ You are not in **{0}** -- nothing to do 😴")]
    NotAMember(String),
}
