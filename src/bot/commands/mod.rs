//! Slash command definitions.
//!
//! Each command module exposes its `NAME`, a `register()` builder used when the bot
//! becomes ready, a pure `parse()` turning options into a validated request, a
//! `request()` that authorizes the caller before parsing, and the async `run()` invoked
//! by the interaction handler after the response was deferred.

pub mod banboth;
pub mod discordban;
pub mod gameban;
pub mod options;
pub mod ping;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::bot::guild::SerenityGuild;
use crate::error::{command::CommandError, AppError};
use crate::model::{
    caller::Caller,
    command::MAX_DELETE_MESSAGE_DAYS,
    permission::{PermissionPolicy, PermissionTier},
};
use crate::service::permission::authorize;

/// Every command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    vec![
        ping::register(),
        gameban::register(),
        discordban::register(),
        banboth::register(),
    ]
}

/// Resolves the guild a command was invoked in and the invoking member.
///
/// # Returns
/// - `Ok((SerenityGuild, Caller))` - Guild handle and permission view of the invoker
/// - `Err(AppError::CommandErr(NotInGuild))` - Invoked outside a server
/// - `Err(AppError::DiscordErr)` - Guild was not cached and could not be fetched
pub async fn invocation(
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(SerenityGuild, Caller), AppError> {
    let (Some(guild_id), Some(member)) = (command.guild_id, command.member.as_deref()) else {
        return Err(CommandError::NotInGuild.into());
    };

    let guild = SerenityGuild::load(ctx, guild_id).await?;
    let caller = guild.caller(member);

    Ok((guild, caller))
}

/// Checks the caller's tier, then parses the options.
///
/// Argument errors are only reported to callers allowed to run the command.
fn authorized<T>(
    caller: &Caller,
    policy: &PermissionPolicy,
    tier: PermissionTier,
    command: &str,
    parse: impl FnOnce() -> Result<T, CommandError>,
) -> Result<T, AppError> {
    authorize(caller, policy, tier).inspect_err(|_| {
        tracing::info!(
            "/{} denied for {} due to insufficient permissions",
            command,
            caller.name
        )
    })?;

    Ok(parse()?)
}

fn duration_option() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::Integer,
        "duration",
        "Restriction length in seconds, -1 for permanent (default)",
    )
}

fn exclude_alt_accounts_option() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::Boolean,
        "exclude_alt_accounts",
        "Do not extend the restriction to alternate accounts (default false)",
    )
}

fn delete_message_days_option() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::Integer,
        "delete_message_days",
        "Days of message history to delete (0-7)",
    )
    .min_int_value(0)
    .max_int_value(u64::from(MAX_DELETE_MESSAGE_DAYS))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    /// Tests the registered command set.
    ///
    /// Expected: exactly the four commands, guild-only, required options listed first
    #[test]
    fn registers_four_guild_only_commands() {
        let commands: Vec<Value> = all()
            .into_iter()
            .map(|command| serde_json::to_value(command).unwrap())
            .collect();

        let names: Vec<&str> = commands
            .iter()
            .map(|command| command["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ping", "gameban", "discordban", "banboth"]);

        for command in &commands {
            assert_eq!(command["dm_permission"], Value::Bool(false));

            let required: Vec<bool> = command["options"]
                .as_array()
                .map(|options| {
                    options
                        .iter()
                        .map(|option| option["required"].as_bool().unwrap_or(false))
                        .collect()
                })
                .unwrap_or_default();
            assert!(
                required.windows(2).all(|pair| pair[0] || !pair[1]),
                "required options must come first in {}",
                command["name"]
            );
        }
    }
}
