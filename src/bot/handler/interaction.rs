//! Slash command and autocomplete interactions.
//!
//! Interactions are parsed into a [`CommandInvocation`] and handed to the
//! [`CommandRegistry`]. Commands are always acknowledged with an ephemeral deferral
//! first, since provisioning a nation takes longer than Discord's three second
//! response window.

use serenity::all::{
    CommandData, CommandDataOption, CommandDataOptionValue, CommandInteraction, Context,
    CreateAutocompleteResponse, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, Interaction, RoleId,
};

use crate::{
    bot::command::{CommandContext, CommandRegistry},
    model::command::CommandInvocation,
    platform::discord::DiscordPlatform,
    state::AppState,
};

/// Message shown when a command is used outside of a guild.
const GUILD_ONLY_MESSAGE: &str = "❌ This command can only be used in a server";

/// Routes an interaction to the command or autocomplete handler.
pub async fn handle_interaction(
    state: &AppState,
    registry: &CommandRegistry,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Command(command) => handle_command(state, registry, ctx, command).await,
        Interaction::Autocomplete(command) => {
            handle_autocomplete(state, registry, ctx, command).await
        }
        _ => {}
    }
}

/// Runs a slash command and answers with an ephemeral follow-up.
async fn handle_command(
    state: &AppState,
    registry: &CommandRegistry,
    ctx: Context,
    command: CommandInteraction,
) {
    let Some(guild_id) = command.guild_id else {
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(GUILD_ONLY_MESSAGE)
                .ephemeral(true),
        );
        if let Err(e) = command.create_response(&ctx.http, response).await {
            tracing::warn!("Failed to answer direct message command: {}", e);
        }
        return;
    };

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer /{}: {}", command.data.name, e);
        return;
    }

    let platform = DiscordPlatform::new(ctx.http.clone());
    let invocation = parse_invocation(&command.data);
    let context = CommandContext {
        state,
        platform: &platform,
        guild_id,
        user_id: command.user.id,
        member_roles: member_roles(&command),
    };

    let response = registry.dispatch(&context, &invocation).await;

    let followup = CreateInteractionResponseFollowup::new()
        .content(response.content)
        .ephemeral(true);
    if let Err(e) = command.create_followup(&ctx.http, followup).await {
        tracing::error!("Failed to answer /{}: {}", invocation.path, e);
    }
}

/// Answers an autocomplete request with nation suggestions.
async fn handle_autocomplete(
    state: &AppState,
    registry: &CommandRegistry,
    ctx: Context,
    command: CommandInteraction,
) {
    let Some(guild_id) = command.guild_id else {
        return;
    };

    let platform = DiscordPlatform::new(ctx.http.clone());
    let invocation = parse_invocation(&command.data);
    let context = CommandContext {
        state,
        platform: &platform,
        guild_id,
        user_id: command.user.id,
        member_roles: member_roles(&command),
    };

    let choices = registry.autocomplete(&context, &invocation).await;

    let mut response = CreateAutocompleteResponse::new();
    for choice in choices {
        response = response.add_string_choice(choice.label, choice.value);
    }

    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(response))
        .await
    {
        tracing::debug!("Failed to answer autocomplete for /{}: {}", invocation.path, e);
    }
}

fn member_roles(command: &CommandInteraction) -> Vec<RoleId> {
    command
        .member
        .as_ref()
        .map(|member| member.roles.clone())
        .unwrap_or_default()
}

/// Flattens Serenity's nested command data into a path and string arguments.
fn parse_invocation(data: &CommandData) -> CommandInvocation {
    let mut invocation = CommandInvocation {
        path: data.name.clone(),
        ..Default::default()
    };
    collect_options(&data.options, &mut invocation);
    invocation
}

fn collect_options(options: &[CommandDataOption], invocation: &mut CommandInvocation) {
    for option in options {
        match &option.value {
            CommandDataOptionValue::SubCommand(nested)
            | CommandDataOptionValue::SubCommandGroup(nested) => {
                invocation.path.push(' ');
                invocation.path.push_str(&option.name);
                collect_options(nested, invocation);
            }
            CommandDataOptionValue::String(value) => {
                invocation.args.insert(option.name.clone(), value.clone());
            }
            CommandDataOptionValue::Autocomplete { value, .. } => {
                invocation.focused = Some((option.name.clone(), value.clone()));
            }
            _ => {}
        }
    }
}
