use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::bot::commands::{
    authorized, delete_message_days_option, invocation, options::CommandOptions,
};
use crate::error::{command::CommandError, AppError};
use crate::model::caller::Caller;
use crate::model::command::{clamp_delete_message_days, DiscordBanRequest};
use crate::model::permission::{PermissionPolicy, PermissionTier};
use crate::service::moderation::ModerationService;
use crate::state::BotState;

pub const NAME: &str = "discordban";

const DEFAULT_REASON: &str = "No reason provided";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Ban a member from this server")
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "target", "Member to ban")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "reason",
            "Reason for the ban",
        ))
        .add_option(delete_message_days_option())
}

pub fn parse(options: &CommandOptions) -> Result<DiscordBanRequest, CommandError> {
    let target = options
        .user("target")
        .cloned()
        .ok_or_else(|| CommandError::InvalidArgument("`target` is required.".to_string()))?;

    Ok(DiscordBanRequest {
        target,
        reason: options.text("reason").unwrap_or(DEFAULT_REASON).to_string(),
        delete_message_days: clamp_delete_message_days(
            options.integer("delete_message_days").unwrap_or(0),
        ),
    })
}

/// Requires the Moderator tier before validating the options.
pub fn request(
    caller: &Caller,
    policy: &PermissionPolicy,
    options: &CommandOptions,
) -> Result<DiscordBanRequest, AppError> {
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
    let banned = service.discord_ban(&caller, request).await?;

    Ok(format!("Banned {} from this server.", banned.mention()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::commands::options::OptionValue;
    use crate::model::member::MemberProfile;

    fn target() -> MemberProfile {
        MemberProfile {
            user_id: 42,
            display_name: None,
            nick: Some("ExamplePlayer".to_string()),
            name: "example_player".to_string(),
        }
    }

    #[test]
    fn applies_defaults() {
        let options = CommandOptions::default().with("target", OptionValue::User(target()));

        let request = parse(&options).unwrap();

        assert_eq!(request.target, target());
        assert_eq!(request.reason, "No reason provided");
        assert_eq!(request.delete_message_days, 0);
    }

    #[test]
    fn clamps_deletion_window() {
        let options = CommandOptions::default()
            .with("target", OptionValue::User(target()))
            .with("reason", OptionValue::String("Spam".to_string()))
            .with("delete_message_days", OptionValue::Integer(30));

        let request = parse(&options).unwrap();

        assert_eq!(request.reason, "Spam");
        assert_eq!(request.delete_message_days, 7);
    }

    #[test]
    fn requires_target() {
        assert!(matches!(
            parse(&CommandOptions::default()),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn denies_before_requiring_target() {
        let caller = Caller::new(1, "random");

        assert!(matches!(
            request(&caller, &PermissionPolicy::default(), &CommandOptions::default()),
            Err(AppError::CommandErr(CommandError::PermissionDenied(_)))
        ));
    }
}
