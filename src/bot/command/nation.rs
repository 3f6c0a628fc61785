//! Member commands of the `/nation` group.

use serenity::async_trait;

use crate::{
    bot::command::{CommandContext, CommandOption, SlashCommand, NATION_OPTION},
    error::AppError,
    model::{
        command::{CommandArgs, CommandResponse},
        nation::{nation_label, GLOBAL_NATION, GLOBAL_NATION_EMOJI},
    },
    service::{
        autocomplete::{AutocompleteContext, AutocompleteService, NationChoice},
        nation::{membership::GlobalToggle, NationService},
    },
};

/// Suggests nations for the `nation` option in the given context.
pub(super) async fn suggest_nations(
    ctx: &CommandContext<'_>,
    option: &str,
    query: &str,
    context: AutocompleteContext,
) -> Vec<NationChoice> {
    if option != NATION_OPTION.name {
        return Vec::new();
    }

    AutocompleteService::new(ctx.state)
        .suggest(ctx.guild_id, &ctx.member_roles, context, query)
        .await
}

/// `/nation join nation:<name>`
pub struct JoinCommand;

#[async_trait]
impl SlashCommand for JoinCommand {
    fn path(&self) -> &'static str {
        "nation join"
    }

    fn description(&self) -> &'static str {
        "🎉 Join a nation"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![NATION_OPTION]
    }

    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandResponse, AppError> {
        let label = NationService::new(ctx.state, ctx.platform)
            .join(ctx.guild_id, ctx.user_id, args.required(NATION_OPTION.name)?)
            .await?;

        Ok(CommandResponse::new(format!("✅ Joined **{}**", label)))
    }

    async fn autocomplete(
        &self,
        ctx: &CommandContext<'_>,
        option: &str,
        query: &str,
    ) -> Vec<NationChoice> {
        suggest_nations(ctx, option, query, AutocompleteContext::Join).await
    }
}

/// `/nation leave nation:<name>`
pub struct LeaveCommand;

#[async_trait]
impl SlashCommand for LeaveCommand {
    fn path(&self) -> &'static str {
        "nation leave"
    }

    fn description(&self) -> &'static str {
        "👋 Leave a nation"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![NATION_OPTION]
    }

    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandResponse, AppError> {
        let label = NationService::new(ctx.state, ctx.platform)
            .leave(ctx.guild_id, ctx.user_id, args.required(NATION_OPTION.name)?)
            .await?;

        Ok(CommandResponse::new(format!("✅ Removed from **{}**", label)))
    }

    async fn autocomplete(
        &self,
        ctx: &CommandContext<'_>,
        option: &str,
        query: &str,
    ) -> Vec<NationChoice> {
        suggest_nations(ctx, option, query, AutocompleteContext::Leave).await
    }
}

/// `/nation global`
pub struct GlobalCommand;

#[async_trait]
impl SlashCommand for GlobalCommand {
    fn path(&self) -> &'static str {
        "nation global"
    }

    fn description(&self) -> &'static str {
        "🌐 Join or leave the Global nation"
    }

    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        _args: &CommandArgs,
    ) -> Result<CommandResponse, AppError> {
        let outcome = NationService::new(ctx.state, ctx.platform)
            .toggle_global(ctx.guild_id, ctx.user_id)
            .await?;
        let label = nation_label(GLOBAL_NATION_EMOJI, GLOBAL_NATION);

        Ok(CommandResponse::new(match outcome {
            GlobalToggle::Joined => format!("✅ Joined **{}**", label),
            GlobalToggle::Left => format!("✅ Removed from **{}**", label),
        }))
    }
}
