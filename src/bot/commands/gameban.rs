//! `/gameban`: game-join restriction through Roblox Open Cloud.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::bot::commands::{
    authorized, duration_option, exclude_alt_accounts_option, invocation,
    options::CommandOptions,
};
use crate::error::{command::CommandError, AppError};
use crate::model::caller::Caller;
use crate::model::command::{GameBanRequest, GameBanTarget};
use crate::model::permission::{PermissionPolicy, PermissionTier};
use crate::model::restriction::RestrictionDuration;
use crate::service::moderation::ModerationService;
use crate::state::BotState;

pub const NAME: &str = "gameban";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Restrict a Roblox user from joining the game")
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "display_reason",
                "Reason shown to the player",
            )
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "private_reason",
                "Reason visible to moderators only",
            )
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "roblox_user_id",
                "Numeric Roblox user ID",
            )
            .min_int_value(1),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "username",
            "Roblox username, used when no user ID is given",
        ))
        .add_option(duration_option())
        .add_option(exclude_alt_accounts_option())
}

/// Validates `/gameban` options.
///
/// Exactly one of `roblox_user_id` and `username` must be given. `duration` defaults to
/// permanent.
pub fn parse(options: &CommandOptions) -> Result<GameBanRequest, CommandError> {
    let target = match (options.integer("roblox_user_id"), options.text("username")) {
        (Some(_), Some(_)) => {
            return Err(CommandError::InvalidArgument(
                "Provide either `roblox_user_id` or `username`, not both.".to_string(),
            ))
        }
        (Some(user_id), None) if user_id > 0 => GameBanTarget::UserId(user_id as u64),
        (Some(user_id), None) => {
            return Err(CommandError::InvalidArgument(format!(
                "`roblox_user_id` must be positive, got {}.",
                user_id
            )))
        }
        (None, Some(username)) => GameBanTarget::Username(username.to_string()),
        (None, None) => {
            return Err(CommandError::InvalidArgument(
                "Provide a `roblox_user_id` or a `username`.".to_string(),
            ))
        }
    };

    let duration = RestrictionDuration::from_seconds(options.integer("duration").unwrap_or(-1))
        .map_err(|e| CommandError::InvalidArgument(format!("Invalid `duration`: {}.", e)))?;

    Ok(GameBanRequest {
        target,
        duration,
        display_reason: options.required_text("display_reason")?,
        private_reason: options.required_text("private_reason")?,
        exclude_alt_accounts: options.boolean("exclude_alt_accounts").unwrap_or(false),
    })
}

/// Requires the Moderator tier before validating the options.
pub fn request(
    caller: &Caller,
    policy: &PermissionPolicy,
    options: &CommandOptions,
) -> Result<GameBanRequest, AppError> {
    authorized(caller, policy, PermissionTier::Moderator, NAME, || parse(options))
}

pub async fn run(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<String, AppError> {
    let (guild, caller) = invocation(ctx, command).await?;
    let options = CommandOptions::from_interaction(command);
    let request = request(&caller, &state.policy, &options)?;

    let service = ModerationService::new(
        &state.roblox,
        &guild,
        &state.policy,
        &state.universe_id,
        state.appeal_url.as_deref(),
    );
    let outcome = service.game_ban(&caller, request).await?;

    Ok(outcome.reply())
}
