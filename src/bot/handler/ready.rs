//! Ready event handler for bot initialization.
//!
//! Fired after the gateway handshake, and again after every new session. The handler:
//! - Logs connection information
//! - Registers the slash commands globally
//! - Binds the log relay to the first `logs` text channel it finds

use serenity::all::{ChannelType, Command, Context, GuildChannel, GuildId, Ready};

use crate::bot::commands;
use crate::logging::relay::ChannelSink;
use crate::state::BotState;

const LOG_CHANNEL_NAME: &str = "logs";

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared bot state holding the log relay
/// - `ctx` - Discord context for HTTP requests
/// - `ready` - Ready event data containing bot user and guild list
pub async fn handle_ready(state: &BotState, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    match Command::set_global_commands(&ctx.http, commands::all()).await {
        Ok(registered) => tracing::info!("Registered {} slash commands", registered.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }

    if state.log_relay.is_bound() {
        return;
    }

    for guild in &ready.guilds {
        let Some(channel) = find_log_channel(&ctx, guild.id).await else {
            continue;
        };

        if state
            .log_relay
            .bind(ChannelSink::new(ctx.http.clone(), channel.id))
        {
            tracing::info!(
                "Relaying logs to #{} ({}) in guild {}",
                channel.name,
                channel.id,
                guild.id
            );
        }
        return;
    }

    tracing::warn!(
        "No '{}' text channel found; logs stay local only",
        LOG_CHANNEL_NAME
    );
}

/// First text channel named `logs` (case-insensitive) in channel list order.
async fn find_log_channel(ctx: &Context, guild_id: GuildId) -> Option<GuildChannel> {
    let channels = match guild_id.channels(&ctx.http).await {
        Ok(channels) => channels,
        Err(e) => {
            tracing::warn!("Failed to list channels of guild {}: {}", guild_id, e);
            return None;
        }
    };

    let mut candidates: Vec<GuildChannel> = channels
        .into_values()
        .filter(|channel| {
            channel.kind == ChannelType::Text && channel.name.eq_ignore_ascii_case(LOG_CHANNEL_NAME)
        })
        .collect();
    candidates.sort_by_key(|channel| (channel.position, channel.id));

    candidates.into_iter().next()
}
