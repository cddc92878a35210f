//! Slash command dispatch.
//!
//! Moderation commands defer their response first since they make several external
//! calls, then edit the deferred reply with the outcome or the error's user message.
//! All replies are ephemeral.

use std::future::Future;

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, Interaction,
};

use crate::bot::commands::{banboth, discordban, gameban, ping};
use crate::error::{command::CommandError, AppError};
use crate::state::BotState;

pub async fn handle_interaction(state: &BotState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    tracing::info!(
        "/{} invoked by {} in guild {:?}",
        command.data.name,
        command.user.name,
        command.guild_id
    );

    match command.data.name.as_str() {
        ping::NAME => reply_ephemeral(&ctx, &command, ping::run()).await,
        gameban::NAME => run_deferred(&ctx, &command, gameban::run(state, &ctx, &command)).await,
        discordban::NAME => {
            run_deferred(&ctx, &command, discordban::run(state, &ctx, &command)).await
        }
        banboth::NAME => run_deferred(&ctx, &command, banboth::run(state, &ctx, &command)).await,
        other => {
            tracing::warn!("Received unknown command '{}'", other);
            let err = CommandError::UnknownCommand(other.to_string());
            reply_ephemeral(&ctx, &command, err.to_string()).await
        }
    }
}

/// Defers the response, awaits `action`, then edits the deferred reply.
///
/// `action` is not polled until the defer was acknowledged.
async fn run_deferred<F>(ctx: &Context, command: &CommandInteraction, action: F)
where
    F: Future<Output = Result<String, AppError>>,
{
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::warn!("Failed to defer /{}: {}", command.data.name, e);
        return;
    }

    let content = match action.await {
        Ok(content) => content,
        Err(e) => e.user_message(),
    };

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::warn!("Failed to edit /{} response: {}", command.data.name, e);
    }
}

async fn reply_ephemeral(ctx: &Context, command: &CommandInteraction, content: String) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::warn!("Failed to respond to /{}: {}", command.data.name, e);
    }
}
