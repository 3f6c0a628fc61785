use serenity::all::{GuildMemberUpdateEvent, Member, RoleId, UserId};

/// The parts of a guild member the bot reasons about.
///
/// Built from whichever Serenity type an event or API call delivers, so services never
/// depend on how the member was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub user_id: UserId,
    pub username: String,
    pub global_name: Option<String>,
    /// Guild-specific nickname.
    pub nick: Option<String>,
    pub roles: Vec<RoleId>,
}

impl MemberProfile {
    /// Name shown in the guild: nickname, then global name, then username.
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .or(self.global_name.as_deref())
            .unwrap_or(&self.username)
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }
}

impl From<&Member> for MemberProfile {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user.id,
            username: member.user.name.clone(),
            global_name: member.user.global_name.clone(),
            nick: member.nick.clone(),
            roles: member.roles.clone(),
        }
    }
}

impl From<&GuildMemberUpdateEvent> for MemberProfile {
    fn from(event: &GuildMemberUpdateEvent) -> Self {
        Self {
            user_id: event.user.id,
            username: event.user.name.clone(),
            global_name: event.user.global_name.clone(),
            nick: event.nick.clone(),
            roles: event.roles.clone(),
        }
    }
}
