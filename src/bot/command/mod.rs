//! Slash command registry.
//!
//! Every command is a [`SlashCommand`] registered under a space-separated path such
//! as `"nation join"`. The first segment is the top-level command shown in the
//! client and the second its subcommand. The registry validates paths when
//! commands are registered, builds the command definitions sent to Discord and
//! dispatches parsed invocations to the matching command.

pub mod admin;
pub mod nation;

#[cfg(test)]
mod test;

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, GuildId, Permissions, RoleId, UserId,
};
use serenity::async_trait;
use std::collections::BTreeMap;

use crate::{
    error::AppError,
    model::command::{CommandArgs, CommandInvocation, CommandResponse},
    platform::Platform,
    service::autocomplete::NationChoice,
    state::AppState,
};

/// Everything a command needs to run for one member.
pub struct CommandContext<'a> {
    pub state: &'a AppState,
    pub platform: &'a dyn Platform,
    pub guild_id: GuildId,
    pub user_id: UserId,
    /// Roles the invoking member held when the interaction was created.
    pub member_roles: Vec<RoleId>,
}

/// A string option of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOption {
    pub name: &'static str,
    pub description: &'static str,
    /// Whether the client asks the bot for suggestions while the member types.
    pub autocomplete: bool,
}

/// Option picking a nation through autocomplete, shared by several commands.
pub const NATION_OPTION: CommandOption = CommandOption {
    name: "nation",
    description: "💡 Find the nation by typing its name (in English, sorry!)",
    autocomplete: true,
};

/// A slash command handler.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Space-separated path of the command, e.g. `"nation join"`.
    fn path(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// String options of the command. All of them are required.
    fn options(&self) -> Vec<CommandOption> {
        Vec::new()
    }

    /// Runs the command.
    ///
    /// # Returns
    /// - `Ok(CommandResponse)` - Message shown to the member
    /// - `Err(AppError)` - Rendered through [`AppError::into_response`]
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandResponse, AppError>;

    /// Suggests values for an option while the member types.
    async fn autocomplete(
        &self,
        _ctx: &CommandContext<'_>,
        _option: &str,
        _query: &str,
    ) -> Vec<NationChoice> {
        Vec::new()
    }
}

/// Settings of a top-level command grouping several subcommands.
struct CommandGroup {
    name: &'static str,
    description: &'static str,
    /// Permissions a member needs to see the group; `None` for everyone.
    permissions: Option<Permissions>,
}

const GROUPS: [CommandGroup; 2] = [
    CommandGroup {
        name: "nation",
        description: "user commands",
        permissions: None,
    },
    CommandGroup {
        name: "admin",
        description: "admin-only commands",
        permissions: Some(Permissions::MANAGE_CHANNELS.union(Permissions::MANAGE_ROLES)),
    },
];

/// Explicit mapping from command path to handler.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn SlashCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry with every command of the bot.
    pub fn standard() -> Result<Self, AppError> {
        let mut registry = Self::new();

        registry.register(nation::JoinCommand)?;
        registry.register(nation::LeaveCommand)?;
        registry.register(nation::GlobalCommand)?;
        registry.register(admin::RemoveCommand)?;
        registry.register(admin::ResetWelcomeCommand)?;
        registry.register(admin::ReplaceWelcomeCommand)?;
        registry.register(admin::EditWelcomeCommand)?;

        Ok(registry)
    }

    /// Adds a command.
    ///
    /// # Returns
    /// - `Ok(())` - The command was registered
    /// - `Err(AppError::InternalError)` - The path is empty, has more than two
    ///   segments, is already taken, or collides with a group of the same name
    pub fn register(&mut self, command: impl SlashCommand + 'static) -> Result<(), AppError> {
        let segments: Vec<&str> = command.path().split_whitespace().collect();
        if segments.is_empty() || segments.len() > 2 {
            return Err(AppError::InternalError(format!(
                "Invalid command path `{}`",
                command.path()
            )));
        }

        let path = segments.join(" ");
        let collides = self.commands.keys().any(|existing| {
            existing == &path
                || existing.split(' ').next() == Some(path.as_str())
                || path.split(' ').next() == Some(existing.as_str())
        });
        if collides {
            return Err(AppError::InternalError(format!(
                "Command path `{}` is already registered",
                path
            )));
        }

        self.commands.insert(path, Box::new(command));
        Ok(())
    }

    /// Registered paths in alphabetical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Runs the command matching an invocation.
    ///
    /// Errors never escape: they are turned into the member-facing message by
    /// [`AppError::into_response`], which logs every failure the member cannot fix.
    pub async fn dispatch(
        &self,
        ctx: &CommandContext<'_>,
        invocation: &CommandInvocation,
    ) -> CommandResponse {
        let Some(command) = self.commands.get(&invocation.path) else {
            return AppError::BadRequest(format!("Unknown command `/{}`", invocation.path))
                .into_response();
        };

        tracing::debug!(
            "Running /{} for member {} in guild {}",
            invocation.path,
            ctx.user_id,
            ctx.guild_id
        );

        match command.run(ctx, &invocation.args).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }

    /// Collects suggestions for the focused option of an invocation.
    pub async fn autocomplete(
        &self,
        ctx: &CommandContext<'_>,
        invocation: &CommandInvocation,
    ) -> Vec<NationChoice> {
        let (Some(command), Some((option, query))) = (
            self.commands.get(&invocation.path),
            invocation.focused.as_ref(),
        ) else {
            return Vec::new();
        };

        command.autocomplete(ctx, option, query).await
    }

    /// Builds the definitions registered with Discord.
    ///
    /// Two-segment paths are grouped into one top-level command per first segment,
    /// each with its subcommands. Every command is guild-only.
    pub fn create_commands(&self) -> Vec<CreateCommand> {
        let mut groups: BTreeMap<&str, Vec<(&str, &dyn SlashCommand)>> = BTreeMap::new();
        let mut commands = Vec::new();

        for (path, command) in &self.commands {
            match path.split_once(' ') {
                Some((group, sub)) => groups
                    .entry(group)
                    .or_default()
                    .push((sub, command.as_ref())),
                None => {
                    let mut builder = CreateCommand::new(path.as_str())
                        .description(command.description())
                        .dm_permission(false);
                    for option in command.options() {
                        builder = builder.add_option(string_option(option));
                    }
                    commands.push(builder);
                }
            }
        }

        for (group, subcommands) in groups {
            let settings = GROUPS.iter().find(|settings| settings.name == group);

            let mut builder = CreateCommand::new(group)
                .description(settings.map_or(group, |settings| settings.description))
                .dm_permission(false);
            if let Some(permissions) = settings.and_then(|settings| settings.permissions) {
                builder = builder.default_member_permissions(permissions);
            }

            for (name, command) in subcommands {
                let mut sub =
                    CreateCommandOption::new(CommandOptionType::SubCommand, name, command.description());
                for option in command.options() {
                    sub = sub.add_sub_option(string_option(option));
                }
                builder = builder.add_option(sub);
            }

            commands.push(builder);
        }

        commands
    }
}

fn string_option(option: CommandOption) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, option.name, option.description)
        .required(true)
        .set_autocomplete(option.autocomplete)
}
