//! Admin commands of the `/admin` group.
//!
//! The group requires the Manage Channels and Manage Roles permissions by default;
//! server admins can change that in the integration settings.

use serenity::async_trait;

use crate::{
    bot::command::{
        nation::suggest_nations, CommandContext, CommandOption, SlashCommand, NATION_OPTION,
    },
    error::AppError,
    model::{
        command::{CommandArgs, CommandResponse},
        nation::title_case,
    },
    service::{
        autocomplete::{AutocompleteContext, NationChoice},
        guild::GuildService,
        nation::NationService,
    },
};

/// `/admin remove nation:<name>`
pub struct RemoveCommand;

#[async_trait]
impl SlashCommand for RemoveCommand {
    fn path(&self) -> &'static str {
        "admin remove"
    }

    fn description(&self) -> &'static str {
        "💀 Remove a nation (admin only)"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![NATION_OPTION]
    }

    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandResponse, AppError> {
        let name = title_case(args.required(NATION_OPTION.name)?);

        let label = NationService::new(ctx.state, ctx.platform)
            .deprovision(ctx.guild_id, &name)
            .await?;

        Ok(CommandResponse::new(format!("✅ Removed **{}**", label)))
    }

    async fn autocomplete(
        &self,
        ctx: &CommandContext<'_>,
        option: &str,
        query: &str,
    ) -> Vec<NationChoice> {
        suggest_nations(ctx, option, query, AutocompleteContext::AdminRemove).await
    }
}

/// `/admin reset-welcome`
pub struct ResetWelcomeCommand;

#[async_trait]
impl SlashCommand for ResetWelcomeCommand {
    fn path(&self) -> &'static str {
        "admin reset-welcome"
    }

    fn description(&self) -> &'static str {
        "Post a new default welcome message (admin only)"
    }

    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        _args: &CommandArgs,
    ) -> Result<CommandResponse, AppError> {
        let link = GuildService::new(ctx.state, ctx.platform)
            .reset_welcome(ctx.guild_id)
            .await?;

        Ok(CommandResponse::new(format!("✅ Posted message {}", link)))
    }
}

const MESSAGE_ID_OPTION: CommandOption = CommandOption {
    name: "message_id",
    description: "ID of a message in the welcome channel",
    autocomplete: false,
};

/// `/admin replace-welcome-with message_id:<id>`
pub struct ReplaceWelcomeCommand;

#[async_trait]
impl SlashCommand for ReplaceWelcomeCommand {
    fn path(&self) -> &'static str {
        "admin replace-welcome-with"
    }

    fn description(&self) -> &'static str {
        "Use an existing message as the welcome message (admin only)"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![MESSAGE_ID_OPTION]
    }

    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandResponse, AppError> {
        let link = GuildService::new(ctx.state, ctx.platform)
            .replace_welcome(ctx.guild_id, args.required(MESSAGE_ID_OPTION.name)?)
            .await?;

        Ok(CommandResponse::new(format!("✅ Welcome message is now {}", link)))
    }
}

const LINE_OPTIONS: [CommandOption; 3] = [
    CommandOption {
        name: "line1",
        description: "First line",
        autocomplete: false,
    },
    CommandOption {
        name: "line2",
        description: "Second line",
        autocomplete: false,
    },
    CommandOption {
        name: "line3",
        description: "Third line",
        autocomplete: false,
    },
];

/// `/admin edit-welcome line1:<text> line2:<text> line3:<text>`
pub struct EditWelcomeCommand;

#[async_trait]
impl SlashCommand for EditWelcomeCommand {
    fn path(&self) -> &'static str {
        "admin edit-welcome"
    }

    fn description(&self) -> &'static str {
        "Edit welcome message (admin only)"
    }

    fn options(&self) -> Vec<CommandOption> {
        LINE_OPTIONS.to_vec()
    }

    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandResponse, AppError> {
        let lines = [
            args.required(LINE_OPTIONS[0].name)?,
            args.required(LINE_OPTIONS[1].name)?,
            args.required(LINE_OPTIONS[2].name)?,
        ];

        let link = GuildService::new(ctx.state, ctx.platform)
            .edit_welcome(ctx.guild_id, lines)
            .await?;

        Ok(CommandResponse::new(format!("✅ Edited message {}", link)))
    }
}
