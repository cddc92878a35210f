//! `/banboth`: restricts a Roblox account and bans the Discord member sharing its name.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::bot::commands::{
    authorized, delete_message_days_option, duration_option, exclude_alt_accounts_option,
    invocation, options::CommandOptions,
};
use crate::error::{command::CommandError, AppError};
use crate::model::caller::Caller;
use crate::model::command::{clamp_delete_message_days, BanBothRequest};
use crate::model::permission::{PermissionPolicy, PermissionTier};
use crate::model::restriction::RestrictionDuration;
use crate::service::moderation::ModerationService;
use crate::state::BotState;

pub const NAME: &str = "banboth";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Restrict a Roblox user and ban the Discord member with the same name")
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "nickname",
                "Roblox username, also matched against Discord names",
            )
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "display_reason",
                "Reason shown to the player and used for the Discord ban",
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
        .add_option(duration_option())
        .add_option(exclude_alt_accounts_option())
        .add_option(delete_message_days_option())
}

pub fn parse(options: &CommandOptions) -> Result<BanBothRequest, CommandError> {
    let duration = RestrictionDuration::from_seconds(options.integer("duration").unwrap_or(-1))
        .map_err(|e| CommandError::InvalidArgument(format!("Invalid `duration`: {}.", e)))?;

    Ok(BanBothRequest {
        nickname: options.required_text("nickname")?,
        duration,
        display_reason: options.required_text("display_reason")?,
        private_reason: options.required_text("private_reason")?,
        exclude_alt_accounts: options.boolean("exclude_alt_accounts").unwrap_or(false),
        delete_message_days: clamp_delete_message_days(
            options.integer("delete_message_days").unwrap_or(0),
        ),
    })
}

/// Requires the SeniorModerator tier before validating the options.
pub fn request(
    caller: &Caller,
    policy: &PermissionPolicy,
    options: &CommandOptions,
) -> Result<BanBothRequest, AppError> {
    authorized(caller, policy, PermissionTier::SeniorModerator, NAME, || {
        parse(options)
    })
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
    let outcome = service.ban_both(&caller, request).await?;

    Ok(outcome.reply())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::commands::options::OptionValue;

    fn options() -> CommandOptions {
        CommandOptions::default()
            .with("nickname", OptionValue::String("ExamplePlayer".to_string()))
            .with("display_reason", OptionValue::String("Exploiting".to_string()))
            .with("private_reason", OptionValue::String("Speed hacks".to_string()))
    }

    #[test]
    fn applies_defaults() {
        let request = parse(&options()).unwrap();

        assert_eq!(
            request,
            BanBothRequest {
                nickname: "ExamplePlayer".to_string(),
                duration: RestrictionDuration::Permanent,
                display_reason: "Exploiting".to_string(),
                private_reason: "Speed hacks".to_string(),
                exclude_alt_accounts: false,
                delete_message_days: 0,
            }
        );
    }

    #[test]
    fn rejects_blank_nickname() {
        let options = options().with("nickname", OptionValue::String("  ".to_string()));

        assert!(matches!(
            parse(&options),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_negative_duration_other_than_permanent() {
        let options = options().with("duration", OptionValue::Integer(-5));

        assert!(matches!(
            parse(&options),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    /// Tests that banboth requires the senior tier before the options are validated.
    ///
    /// Expected: PermissionDenied for a plain moderator with a blank nickname, InvalidArgument
    /// for a supermod with the same options
    #[test]
    fn denies_moderators_before_validating_options() {
        let policy = PermissionPolicy::default();
        let invalid = options().with("nickname", OptionValue::String("  ".to_string()));

        let moderator = Caller::new(10, "modname").with_role(500, "mod");
        assert!(matches!(
            request(&moderator, &policy, &invalid),
            Err(AppError::CommandErr(CommandError::PermissionDenied(
                PermissionTier::SeniorModerator
            )))
        ));

        let supermod = Caller::new(11, "supername").with_role(501, "supermod");
        assert!(matches!(
            request(&supermod, &policy, &invalid),
            Err(AppError::CommandErr(CommandError::InvalidArgument(_)))
        ));
    }
}
